// Copyright 2025 Cowboy AI, LLC.

//! Accounting records
//!
//! Invoice lines with their tax components, and remittances through credit
//! systems. Amounts are exact [`Decimal`](crate::decimal::Decimal) values.

pub mod credit_system;
pub mod invoice_line;
pub mod remittance;

pub use credit_system::CreditSystem;
pub use invoice_line::{InvoiceLine, InvoiceLineTaxComponent, LineSettlement};
pub use remittance::Remittance;
