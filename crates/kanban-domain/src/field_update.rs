/// A partial update of one optional field.
///
/// - `NoChange`: keep the existing value
/// - `Set(value)`: replace it
/// - `Clear`: remove it
///
/// ```
/// use kanban_domain::FieldUpdate;
///
/// let mut assignee = Some("Sam".to_string());
/// FieldUpdate::Set("Alex".to_string()).apply_to(&mut assignee);
/// assert_eq!(assignee.as_deref(), Some("Alex"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut assignee);
/// assert_eq!(assignee, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    /// Build an update from a "new value" flag and a "clear" flag, as
    /// command-line front ends receive them. Clearing wins.
    pub fn from_flags(value: Option<T>, clear: bool) -> Self {
        match (value, clear) {
            (_, true) => FieldUpdate::Clear,
            (Some(value), false) => FieldUpdate::Set(value),
            (None, false) => FieldUpdate::NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_change_keeps_value() {
        let mut field = Some(3);
        FieldUpdate::NoChange.apply_to(&mut field);
        assert_eq!(field, Some(3));
        assert!(!FieldUpdate::<i32>::NoChange.is_change());
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(FieldUpdate::from_flags(Some(1), false), FieldUpdate::Set(1));
        assert_eq!(FieldUpdate::from_flags(Some(1), true), FieldUpdate::Clear);
        assert_eq!(FieldUpdate::<i32>::from_flags(None, true), FieldUpdate::Clear);
        assert_eq!(
            FieldUpdate::<i32>::from_flags(None, false),
            FieldUpdate::NoChange
        );
    }
}
