use uuid::Uuid;

/// New record id: a v4 uuid rendered as 32 lowercase hex digits.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
