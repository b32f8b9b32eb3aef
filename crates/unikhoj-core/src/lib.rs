//! Core library for `UniKhoj`.
//!
//! Contains the lead model shared by the API and its clients, the per-step
//! validation rules of the intake form, the form state machine that drives
//! a draft through its three steps, and the JSON wire types exchanged with
//! `POST /api/leads`. This crate performs no I/O; submission happens behind
//! the [`form::LeadSubmitter`] trait.

pub mod error;
pub mod form;
pub mod lead;
pub mod validation;
pub mod wire;
