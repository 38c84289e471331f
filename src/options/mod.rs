//! Option primitives: typed, individually settable command-line values.
//!
//! Every primitive carries its flag name and an optional value. An unset option renders
//! no tokens at all; a set option renders a fixed token list (`--flag value`, repeated
//! for list-like options). Grouped option sets live in [`sets`].
use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod sets;

pub use sets::{GlobalOptions, OutlineOptions, PageOptions, TocOptions};

/// Shared behaviour of all option primitives.
///
/// Setting is type specific and therefore lives on each primitive; this trait covers
/// what the serializer and the preset code need.
pub trait CliOption {
    /// Stored value as it appears in presets.
    type Snapshot: Serialize + DeserializeOwned + Default;

    /// Flag name without the leading dashes.
    fn flag(&self) -> &'static str;

    /// Clear the option back to its absent state.
    fn unset(&mut self);

    /// Render the option as command-line tokens.
    fn args(&self) -> Vec<String>;

    fn snapshot(&self) -> Self::Snapshot;

    /// Replace the stored value with a preset value.
    fn restore(&mut self, snapshot: Self::Snapshot);

    fn is_set(&self) -> bool {
        !self.args().is_empty()
    }
}

fn flag_token(flag: &str) -> String {
    format!("--{}", flag)
}

/// Single text value: `--flag value`.
#[derive(Debug, Clone, PartialEq)]
pub struct StringOption {
    flag: &'static str,
    value: Option<String>,
}

impl StringOption {
    pub fn new(flag: &'static str) -> Self {
        Self { flag, value: None }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl CliOption for StringOption {
    type Snapshot = Option<String>;

    fn flag(&self) -> &'static str {
        self.flag
    }

    fn unset(&mut self) {
        self.value = None;
    }

    fn args(&self) -> Vec<String> {
        match &self.value {
            Some(value) => vec![flag_token(self.flag), value.clone()],
            None => Vec::new(),
        }
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.value.clone()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.value = snapshot;
    }
}

/// Repeatable text value: `--flag v1 --flag v2`.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceOption {
    flag: &'static str,
    values: Vec<String>,
}

impl SliceOption {
    pub fn new(flag: &'static str) -> Self {
        Self {
            flag,
            values: Vec::new(),
        }
    }

    /// Appends a value; earlier values are kept.
    pub fn set(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl CliOption for SliceOption {
    type Snapshot = Vec<String>;

    fn flag(&self) -> &'static str {
        self.flag
    }

    fn unset(&mut self) {
        self.values.clear();
    }

    fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.values.len() * 2);
        for value in &self.values {
            args.push(flag_token(self.flag));
            args.push(value.clone());
        }
        args
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.values.clone()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.values = snapshot;
    }
}

/// Repeatable key/value pair: `--flag k1 v1 --flag k2 v2`.
///
/// Pairs keep insertion order and duplicate keys are allowed, so this is a list and not
/// a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOption {
    flag: &'static str,
    pairs: Vec<(String, String)>,
}

impl MapOption {
    pub fn new(flag: &'static str) -> Self {
        Self {
            flag,
            pairs: Vec::new(),
        }
    }

    /// Appends a pair; earlier pairs, including ones with the same key, are kept.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl CliOption for MapOption {
    type Snapshot = Vec<(String, String)>;

    fn flag(&self) -> &'static str {
        self.flag
    }

    fn unset(&mut self) {
        self.pairs.clear();
    }

    fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.pairs.len() * 3);
        for (key, value) in &self.pairs {
            args.push(flag_token(self.flag));
            args.push(key.clone());
            args.push(value.clone());
        }
        args
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.pairs.clone()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.pairs = snapshot;
    }
}

/// Unsigned integer value: `--flag 42`. Zero is a real value, not "unset".
#[derive(Debug, Clone, PartialEq)]
pub struct UIntOption {
    flag: &'static str,
    value: Option<u32>,
}

impl UIntOption {
    pub fn new(flag: &'static str) -> Self {
        Self { flag, value: None }
    }

    pub fn set(&mut self, value: u32) {
        self.value = Some(value);
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl CliOption for UIntOption {
    type Snapshot = Option<u32>;

    fn flag(&self) -> &'static str {
        self.flag
    }

    fn unset(&mut self) {
        self.value = None;
    }

    fn args(&self) -> Vec<String> {
        match self.value {
            Some(value) => vec![flag_token(self.flag), value.to_string()],
            None => Vec::new(),
        }
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.value
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.value = snapshot;
    }
}

/// Real value, always rendered with three decimals: `--flag 0.750`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatOption {
    flag: &'static str,
    value: Option<f64>,
}

impl FloatOption {
    pub fn new(flag: &'static str) -> Self {
        Self { flag, value: None }
    }

    /// Stores the value. It must be finite; wkhtmltopdf cannot parse `NaN` or `inf`.
    pub fn set(&mut self, value: f64) {
        debug_assert!(value.is_finite(), "--{} needs a finite value, got {}", self.flag, value);
        self.value = Some(value);
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

impl CliOption for FloatOption {
    type Snapshot = Option<f64>;

    fn flag(&self) -> &'static str {
        self.flag
    }

    fn unset(&mut self) {
        self.value = None;
    }

    fn args(&self) -> Vec<String> {
        match self.value {
            Some(value) => vec![flag_token(self.flag), format!("{:.3}", value)],
            None => Vec::new(),
        }
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.value
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.value = snapshot;
    }
}

/// Presence-only switch: `--flag` when true, nothing when false.
///
/// `false` means "not given"; there is no negative form.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolOption {
    flag: &'static str,
    value: bool,
}

impl BoolOption {
    pub fn new(flag: &'static str) -> Self {
        Self { flag, value: false }
    }

    pub fn set(&mut self, value: bool) {
        self.value = value;
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl CliOption for BoolOption {
    type Snapshot = bool;

    fn flag(&self) -> &'static str {
        self.flag
    }

    fn unset(&mut self) {
        self.value = false;
    }

    fn args(&self) -> Vec<String> {
        if self.value {
            vec![flag_token(self.flag)]
        } else {
            Vec::new()
        }
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.value
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.value = snapshot;
    }
}
