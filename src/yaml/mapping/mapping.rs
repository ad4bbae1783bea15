use core::fmt;

use crate::yaml::data::{Data, Id};
use crate::yaml::mapping::{Entry, Iter};
use crate::yaml::Value;

/// Accessor for a mapping.
///
/// # Examples
///
/// ```
/// use yamlmerge::yaml;
///
/// let doc = yaml::from_slice(
///     r#"
///     number1: 10
///     number2: 20
///     mapping:
///         inner: 400
///     string3: "I am a quoted string!"
///     "#
/// )?;
///
/// let root = doc.as_ref().as_mapping().ok_or("missing root mapping")?;
///
/// assert_eq!(root.get("number1").and_then(|v| v.as_u32()), Some(10));
/// assert_eq!(root.get("number2").and_then(|v| v.as_u32()), Some(20));
///
/// let mapping = root.get("mapping").and_then(|v| v.as_mapping()).ok_or("missing inner mapping")?;
/// assert_eq!(mapping.get("inner").and_then(|v| v.as_u32()), Some(400));
///
/// assert_eq!(root.get("string3").and_then(|v| v.as_str()), Some("I am a quoted string!"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
///
/// Mappings can also be defined in a flow form:
///
/// ```
/// use yamlmerge::yaml;
///
/// let doc = yaml::from_slice("{}")?;
/// assert_eq!(doc.to_string(), "{}");
///
/// let doc = yaml::from_slice("{test: 1,}")?;
/// let mapping = doc.as_ref().as_mapping().ok_or("missing root mapping")?;
/// assert!(!mapping.is_empty());
/// assert_eq!(mapping.len(), 1);
/// assert_eq!(doc.to_string(), "{test: 1,}");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct Mapping<'a> {
    data: &'a Data,
    pub(crate) id: Id,
}

impl<'a> Mapping<'a> {
    pub(crate) fn new(data: &'a Data, id: Id) -> Self {
        Self { data, id }
    }

    /// Get the opaque [`Id`] associated with this mapping.
    #[must_use]
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the length of the mapping.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.data.mapping(self.id).items.len()
    }

    /// Test if the mapping is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.mapping(self.id).items.is_empty()
    }

    /// Get a value from the mapping by its key.
    ///
    /// Only keys which are strings can be looked up, regardless of how they
    /// are quoted. If the key is present more than once, the last one wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice(
    ///     r#"
    ///     'single': 1
    ///     "double": 2
    ///     bare: 3
    ///     bare: 4
    ///     "#
    /// )?;
    ///
    /// let root = doc.as_ref().as_mapping().ok_or("missing root mapping")?;
    ///
    /// assert_eq!(root.get("single").and_then(|v| v.as_u32()), Some(1));
    /// assert_eq!(root.get("double").and_then(|v| v.as_u32()), Some(2));
    /// assert_eq!(root.get("bare").and_then(|v| v.as_u32()), Some(4));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value<'a>> {
        self.iter()
            .rev()
            .find(|e| e.key_str().map_or(false, |k| k == key))
            .map(|e| e.value())
    }

    /// Get the entry at the given position.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<Entry<'a>> {
        let item = *self.data.mapping(self.id).items.get(index)?;
        Some(Entry::new(self.data, self.id, item))
    }

    /// Returns an iterator over the entries of the [Mapping], in the order
    /// they appear in the document.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlmerge::yaml;
    ///
    /// let doc = yaml::from_slice(
    ///     r#"
    ///     one: 1
    ///     two: 2
    ///     three: 3
    ///     "#,
    /// )?;
    ///
    /// let root = doc.as_ref().as_mapping().ok_or("missing root mapping")?;
    /// assert!(root.iter().flat_map(|e| e.value().as_u32()).eq([1, 2, 3]));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    #[inline]
    pub fn iter(&self) -> Iter<'a> {
        Iter::new(self.data, self.id)
    }
}

impl fmt::Display for Mapping<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Value::new(self.data, self.id).fmt(f)
    }
}

impl fmt::Debug for Mapping<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|e| (e.key(), e.value())))
            .finish()
    }
}

impl<'a> IntoIterator for Mapping<'a> {
    type Item = Entry<'a>;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Mapping<'a> {
    type Item = Entry<'a>;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
