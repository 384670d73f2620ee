//! Convenience accessors for `Result`.

/// Split a result into its two halves, exactly one of which is `Some`.
pub trait ResultExt<T, E> {
    fn output(self) -> (Option<T>, Option<E>);
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn output(self) -> (Option<T>, Option<E>) {
        match self {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_fills_first_slot() {
        let result: Result<i32, String> = Ok(7);
        assert_eq!(result.output(), (Some(7), None));
    }

    #[test]
    fn failure_fills_second_slot() {
        let result: Result<i32, String> = Err("nope".to_string());
        assert_eq!(result.output(), (None, Some("nope".to_string())));
    }
}
