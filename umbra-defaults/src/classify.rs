//! Key classification by naming convention.
//!
//! The key suffix is the only type information a properties source carries.
//! Checks run in a fixed order and the first match wins; `fooIconSize` does
//! not end in `Icon`, so it is a size.

/// The value kind proposed for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `...Insets`
    Insets,
    /// `....border`, `...Border`, `....component`, `...Component`, `...Renderer`
    Instance,
    /// `....font`
    Font,
    /// `....icon`, `...Icon`
    Icon,
    /// `...Size`, `....size`
    Size,
    /// Anything else; resolved through the scalar fallback chain.
    Scalar,
}

const SUFFIXES: &[(&str, ValueKind)] = &[
    ("Insets", ValueKind::Insets),
    (".border", ValueKind::Instance),
    ("Border", ValueKind::Instance),
    (".component", ValueKind::Instance),
    ("Component", ValueKind::Instance),
    ("Renderer", ValueKind::Instance),
    (".font", ValueKind::Font),
    (".icon", ValueKind::Icon),
    ("Icon", ValueKind::Icon),
    ("Size", ValueKind::Size),
    (".size", ValueKind::Size),
];

/// Propose a value kind for `key` from its suffix.
pub fn classify(key: &str) -> ValueKind {
    SUFFIXES
        .iter()
        .find(|(suffix, _)| key.ends_with(suffix))
        .map_or(ValueKind::Scalar, |(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes() {
        assert_eq!(classify("Button.borderInsets"), ValueKind::Insets);
        assert_eq!(classify("Button.border"), ValueKind::Instance);
        assert_eq!(classify("Table.focusCellBorder"), ValueKind::Instance);
        assert_eq!(classify("ComboBox.editorComponent"), ValueKind::Instance);
        assert_eq!(classify("Tree.cellRenderer"), ValueKind::Instance);
        assert_eq!(classify("Label.font"), ValueKind::Font);
        assert_eq!(classify("CheckBox.icon"), ValueKind::Icon);
        assert_eq!(classify("Tree.openIcon"), ValueKind::Icon);
        assert_eq!(classify("ScrollBar.size"), ValueKind::Size);
        assert_eq!(classify("Slider.thumbSize"), ValueKind::Size);
        assert_eq!(classify("Button.arc"), ValueKind::Scalar);
    }

    #[test]
    fn test_icon_size_is_size() {
        assert_eq!(classify("myIconSize"), ValueKind::Size);
        assert_eq!(classify("Tree.iconSize"), ValueKind::Size);
    }

    #[test]
    fn test_independent_of_prefix() {
        for prefix in ["", "a", "Very.Long.prefix_", "Insets"] {
            assert_eq!(classify(&format!("{}Insets", prefix)), ValueKind::Insets);
            assert_eq!(classify(&format!("{}.font", prefix)), ValueKind::Font);
            assert_eq!(classify(&format!("{}Icon", prefix)), ValueKind::Icon);
            assert_eq!(classify(&format!("{}Size", prefix)), ValueKind::Size);
        }
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert_eq!(classify("Button.Font"), ValueKind::Scalar);
        assert_eq!(classify("Button.insets"), ValueKind::Scalar);
    }
}
