//! A [`Sequence`] of values.
//!
//! # Examples
//!
//! ```
//! use yamlmerge::yaml;
//!
//! let doc = yaml::from_slice(
//!     r#"
//!     - 10
//!     - [20, 30]
//!     "#,
//! )?;
//!
//! let root = doc.as_ref().as_sequence().ok_or("missing root sequence")?;
//! assert_eq!(root.get(0).and_then(|v| v.as_u32()), Some(10));
//!
//! let inner = root.get(1).and_then(|v| v.as_sequence()).ok_or("missing inner sequence")?;
//! assert!(inner.iter().flat_map(|v| v.as_u32()).eq([20, 30]));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

mod iter;
pub use self::iter::Iter;

mod sequence;
pub use self::sequence::Sequence;
