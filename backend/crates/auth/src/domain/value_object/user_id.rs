use kernel::id::Id;

pub struct UserMarker;
pub type UserId = Id<UserMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_subject() {
        let user_id = UserId::from_subject(12).unwrap();
        assert_eq!(user_id.get(), 12);
        assert_eq!(user_id.as_subject(), 12);
    }

    #[test]
    fn test_sentinel_subject_is_not_a_user() {
        assert!(UserId::from_subject(0).is_none());
    }
}
