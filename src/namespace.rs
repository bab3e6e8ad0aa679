/// Normalize a namespace string into the channel-naming convention.
///
/// The scan is left-to-right and non-overlapping: the start of the string is
/// an implicit boundary and every `_` is an explicit boundary. A boundary
/// consumes exactly one following character and emits it uppercased; an `_`
/// boundary marker is dropped. Adjacent underscores therefore collapse to a
/// single underscore (the second one is the consumed character, which has no
/// uppercase form). A trailing `_` has nothing to consume and passes through
/// unchanged.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    // Implicit boundary at the very start.
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }

    while let Some(c) = chars.next() {
        if c == '_' {
            match chars.next() {
                Some(next) => out.extend(next.to_uppercase()),
                None => out.push('_'),
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn normalization_table() {
        assert_eq!("TestThing", normalize("test_thing"));
        assert_eq!("Test-thing", normalize("test-thing"));
        assert_eq!("Test-Thing", normalize("Test-_thing"));
        assert_eq!("Test_thing", normalize("test__thing"));
        assert_eq!("TESTTHING", normalize("TEST_THING"));
        assert_eq!("TestThing", normalize("TestThing"));
    }

    #[test]
    fn trailing_underscore_passes_through() {
        assert_eq!("Test_", normalize("test_"));
    }

    #[test]
    fn empty_input() {
        assert_eq!("", normalize(""));
    }

    #[test]
    fn idempotent_on_outputs() {
        for input in ["test_thing", "Test-_thing", "TEST_THING", "a_b_c"] {
            let once = normalize(input);
            assert_eq!(once, normalize(&once), "input: {input}");
        }
    }
}
