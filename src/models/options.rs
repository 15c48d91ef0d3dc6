use serde_yaml_ng::{Mapping, Value};
use std::fmt;

/// Option keys consulted by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Plugins,
    Languages,
    Themes,
}

impl OptionKey {
    pub const ALL: [OptionKey; 3] = [OptionKey::Plugins, OptionKey::Languages, OptionKey::Themes];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::Plugins => "plugins",
            OptionKey::Languages => "languages",
            OptionKey::Themes => "themes",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The merged addon options for one build.
///
/// Holds the raw value of each recognised key; classification into a
/// [`Selector`] happens in the resolver so type errors can name the category.
/// Unrecognised keys are carried in [`extra`](Self::extra) and never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    plugins: Value,
    languages: Value,
    themes: Value,
    extra: Mapping,
    plugins_declared: bool,
}

impl EffectiveConfig {
    /// Defaults every recognised key to `false` (nothing bundled).
    pub fn defaults() -> Mapping {
        let mut defaults = Mapping::new();
        for key in OptionKey::ALL {
            defaults.insert(Value::from(key.as_str()), Value::Bool(false));
        }
        defaults
    }

    /// Build from a fully merged mapping.
    pub fn from_merged(mut merged: Mapping, plugins_declared: bool) -> Self {
        let mut take = |key: OptionKey| {
            merged
                .shift_remove(key.as_str())
                .unwrap_or(Value::Bool(false))
        };
        let plugins = take(OptionKey::Plugins);
        let languages = take(OptionKey::Languages);
        let themes = take(OptionKey::Themes);

        Self {
            plugins,
            languages,
            themes,
            extra: merged,
            plugins_declared,
        }
    }

    pub fn value(&self, key: OptionKey) -> &Value {
        match key {
            OptionKey::Plugins => &self.plugins,
            OptionKey::Languages => &self.languages,
            OptionKey::Themes => &self.themes,
        }
    }

    pub fn plugins(&self) -> &Value {
        &self.plugins
    }

    pub fn languages(&self) -> &Value {
        &self.languages
    }

    pub fn themes(&self) -> &Value {
        &self.themes
    }

    /// Keys that were merged but are not recognised by the resolver.
    pub fn extra(&self) -> &Mapping {
        &self.extra
    }

    /// Whether any level of the chain declared `plugins` explicitly.
    pub fn plugins_declared(&self) -> bool {
        self.plugins_declared
    }

    /// Deprecation line shown when `plugins` was left to its default.
    pub fn deprecation_notice(&self, addon: &str) -> Option<String> {
        if self.plugins_declared {
            return None;
        }

        Some(format!(
            "{addon}: The default value for the 'plugins' option has changed from 'true' to 'false'. \
             Please update '{addon}.plugins' in the build configuration to indicate which plugin(s) you need; \
             string = one plugin name, array = multiple plugin names, true = all plugins, false = no plugins."
        ))
    }
}

/// Classified form of a category option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Nothing requested, the category is skipped entirely
    Disabled,
    /// Every file discovered for the category
    All,
    /// An explicit list, used verbatim (duplicates preserved)
    Named(Vec<String>),
}

impl Selector {
    /// Classify a raw option value.
    ///
    /// `false`, null, `""` and `[]` all mean "nothing requested". Returns `None`
    /// for numbers, mappings and lists holding anything other than strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => Some(Selector::Disabled),
            Value::Bool(true) => Some(Selector::All),
            Value::String(name) if name.is_empty() => Some(Selector::Disabled),
            Value::String(name) => Some(Selector::Named(vec![name.clone()])),
            Value::Sequence(items) if items.is_empty() => Some(Selector::Disabled),
            Value::Sequence(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Selector::Named),
            Value::Tagged(tagged) => Selector::from_value(&tagged.value),
            _ => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Selector::Disabled)
    }
}
