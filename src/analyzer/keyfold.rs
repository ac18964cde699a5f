//! Symbol name to package key folding

use crate::config::GroupingLevel;

/// Fold a fully-qualified Go symbol name into its package key.
///
/// Precedence:
/// 1. a name containing `/` is cut at the **last** `/`
/// 2. otherwise a name containing `.` is cut at the **first** `.`
/// 3. otherwise the name is returned unchanged
///
/// Rule 1 wins even when a `.` appears earlier, so
/// `vendor/golang.org/x/net/ipv4.parseTTL` folds to `vendor/golang.org/x/net`.
///
/// The grouping level is reserved; folding does not vary with it.
///
/// # Examples
///
/// ```
/// use gosize::analyzer::fold_key;
/// use gosize::config::GroupingLevel;
///
/// let level = GroupingLevel::default();
/// assert_eq!(fold_key("runtime.gcd", level), "runtime");
/// assert_eq!(fold_key("crypto/cipher.xorBytes", level), "crypto");
/// assert_eq!(fold_key("_x_cgo_callers", level), "_x_cgo_callers");
/// ```
pub fn fold_key(name: &str, _level: GroupingLevel) -> &str {
    if let Some(idx) = name.rfind('/') {
        &name[..idx]
    } else if let Some(idx) = name.find('.') {
        &name[..idx]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(name: &str) -> &str {
        fold_key(name, GroupingLevel::default())
    }

    #[test]
    fn test_fold_key_known_symbols() {
        assert_eq!(fold("_x_cgo_callers"), "_x_cgo_callers");
        assert_eq!(fold("crypto.statictmp_0"), "crypto");
        assert_eq!(fold("crypto/cipher.xorBytes"), "crypto");
        assert_eq!(fold("runtime.gcd"), "runtime");
        assert_eq!(
            fold("vendor/golang.org/x/net/ipv4.parseTTL"),
            "vendor/golang.org/x/net"
        );
    }

    #[test]
    fn test_fold_key_slash_beats_earlier_dot() {
        assert_eq!(fold("golang.org/x/text.Foo"), "golang.org/x");
        assert_eq!(fold("a.b/c"), "a.b");
    }

    #[test]
    fn test_fold_key_leading_slash_yields_empty_key() {
        assert_eq!(fold("/abs"), "");
        assert_eq!(fold(".hidden"), "");
    }

    #[test]
    fn test_fold_key_ignores_level() {
        let name = "net/http.(*Server).Serve";
        let a = fold_key(name, GroupingLevel::new(1).unwrap());
        let b = fold_key(name, GroupingLevel::new(5).unwrap());
        assert_eq!(a, "net");
        assert_eq!(a, b);
    }

    mod proptest_keyfold {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_fold_key_plain_names_unchanged(name in "[a-zA-Z0-9_]{0,24}") {
                prop_assert_eq!(fold(&name), name.as_str());
            }

            #[test]
            fn test_fold_key_cuts_at_last_slash(
                head in "[a-z.]{0,10}(/[a-z.]{1,8}){0,3}",
                tail in "[a-zA-Z0-9_.]{0,12}",
            ) {
                let name = format!("{}/{}", head, tail);
                prop_assert_eq!(fold(&name), head.as_str());
            }
        }
    }
}
