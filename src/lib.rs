//! prioboard — feature prioritization and task board for small product teams.
//!
//! Features are ranked by a weighted-value score computed from four 1-5
//! ratings ([`score::calc_score`]); execution work is tracked as tasks
//! moving across a five-column kanban board. [`db::Database`] owns both
//! collections, [`views`] provides the sort/filter projections consumed by
//! clients, [`seed`] populates an empty board once, and [`api`] exposes the
//! whole thing over HTTP.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod score;
pub mod seed;
pub mod views;
