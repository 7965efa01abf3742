//! Typed-list parsing shared by `:types`, `:parameters`, `:objects`,
//! `:constants` and `:functions`.
//!
//! Names are collected left to right; a `-` token makes the next item the
//! type of every name collected since the previous `-`. So `a b c - foo`
//! types all three names as `foo`.

use crate::sexpr::SExpr;

/// Splits `items` into `(item, type)` pairs. Trailing untyped items get `None`.
pub(crate) fn parse_typed_list(items: &[SExpr]) -> Vec<(SExpr, Option<String>)> {
    let mut typed = Vec::with_capacity(items.len());
    let mut pending: Vec<SExpr> = Vec::new();
    let mut i = 0;
    while i < items.len() {
        if items[i].as_atom() == Some("-") {
            // `(either a b)` renders as its text form
            let type_name = items.get(i + 1).map(|t| t.to_string());
            typed.extend(pending.drain(..).map(|item| (item, type_name.clone())));
            i += 2;
            continue;
        }
        pending.push(items[i].clone());
        i += 1;
    }
    typed.extend(pending.into_iter().map(|item| (item, None)));
    typed
}

/// Typed names with a fallback type for untyped entries.
pub(crate) fn typed_names(items: &[SExpr], default_type: &str) -> Vec<(String, String)> {
    parse_typed_list(items)
        .into_iter()
        .filter_map(|(item, ty)| {
            let name = item.as_atom()?.to_string();
            Some((name, ty.unwrap_or_else(|| default_type.to_string())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sexpr::read_all;

    fn items(text: &str) -> Vec<SExpr> {
        read_all(&format!("({})", text))[0].as_list().unwrap().to_vec()
    }

    #[test]
    fn test_type_applies_to_all_preceding_names() {
        let typed = typed_names(&items("a b c - foo d - bar"), "object");
        assert_eq!(
            typed,
            vec![
                ("a".to_string(), "foo".to_string()),
                ("b".to_string(), "foo".to_string()),
                ("c".to_string(), "foo".to_string()),
                ("d".to_string(), "bar".to_string()),
            ]
        );
    }

    #[test]
    fn test_trailing_names_get_default() {
        let typed = typed_names(&items("?r - robot ?x"), "object");
        assert_eq!(typed[1], ("?x".to_string(), "object".to_string()));
    }

    #[test]
    fn test_either_type_rendered() {
        let typed = typed_names(&items("?x - (either rover drone)"), "object");
        assert_eq!(typed[0].1, "(either rover drone)");
    }

    #[test]
    fn test_lists_keep_their_type() {
        let typed = parse_typed_list(&items("(battery ?r) (speed ?r) - number (cost)"));
        assert_eq!(typed.len(), 3);
        assert_eq!(typed[0].1.as_deref(), Some("number"));
        assert_eq!(typed[1].1.as_deref(), Some("number"));
        assert_eq!(typed[2].1, None);
    }

    #[test]
    fn test_dangling_dash_leaves_untyped() {
        let typed = parse_typed_list(&items("a b -"));
        assert_eq!(typed.len(), 2);
        assert!(typed.iter().all(|(_, ty)| ty.is_none()));
    }
}
