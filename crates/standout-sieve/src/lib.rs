//! Sieve - fluent predicate builder for filtering Rust values.
//!
//! Sieve composes a sequence of small conditions over a type `T` into one
//! reusable [`Predicate`]. It supports:
//!
//! - AND joining by default, OR joining through [`Filter::or`]
//! - Parenthesized sub-expressions with [`Filter::add_group`]
//! - Negation of the whole expression with [`Filter::build_negated`]
//! - Ready-made conditions for strings, numbers, dates, collections,
//!   booleans and optional values
//! - By-name clauses for types implementing [`Fields`]
//! - Rejection of conditions that can never discriminate (literal `true`,
//!   `false`, null, or a comparison against a literal `0` on the left)
//!
//! # Quick Start
//!
//! ```rust
//! use standout_sieve::Filter;
//!
//! struct User {
//!     name: String,
//!     age: u32,
//!     email: String,
//!     tags: Vec<String>,
//! }
//!
//! let users = vec![
//!     User { name: "Ada".into(), age: 36, email: "ada@example.org".into(), tags: vec!["admin".into()] },
//!     User { name: "Bo".into(), age: 17, email: "bo@example.org".into(), tags: vec![] },
//!     User { name: "Cy".into(), age: 52, email: "not an email".into(), tags: vec![] },
//! ];
//!
//! let mut filter = Filter::new();
//! filter
//!     .is_email(|u: &User| &u.email).unwrap()
//!     .add_group(|g| {
//!         g.min_value(|u: &User| &u.age, 18u32)?
//!             .or()
//!             .not_empty_collection(|u: &User| u.tags.as_slice())?;
//!         Ok(())
//!     }).unwrap();
//!
//! let allowed = filter.build();
//! let names: Vec<_> = allowed.filter(&users).iter().map(|u| u.name.as_str()).collect();
//! assert_eq!(names, ["Ada"]);
//! ```
//!
//! # Joining Semantics
//!
//! Conditions are joined left to right. [`Filter::or`] takes the most
//! recent condition and opens an OR group with it; everything added while
//! the group is open joins the group. [`Filter::and`] closes the group
//! **by discarding it**, so use [`Filter::add_group`] for `(a || b) && c`:
//!
//! ```text
//! add(a).or().add(b)            =>  a || b
//! add(a).add(b).or().add(c)     =>  a && (b || c)
//! add(a).or().add(b).and()      =>  (empty: the group is dropped)
//! add_group(a.or().b).add(c)    =>  (a || b) && c
//! ```
//!
//! # Configuration
//!
//! Each filter carries a [`SieveConfig`], inherited by its groups. It can be
//! loaded from YAML or JSON and controls degeneracy rejection, case handling
//! of substring checks, and the clock used by relative date checks.

mod condition;
mod config;
mod error;
mod fields;
mod filter;
mod leaves;
mod op;
mod predicate;
pub mod validation;
mod value;

// Re-export public API
pub use condition::{Condition, Operand, Shape};
pub use config::{Clock, SieveConfig};
pub use error::{Degeneracy, Result, SieveError};
pub use fields::{Clause, ClauseValue, Fields};
pub use filter::{Filter, Join};
pub use leaves::{field, Accessor};
pub use op::Op;
pub use predicate::Predicate;
pub use value::{Number, Value, ValueKind};
