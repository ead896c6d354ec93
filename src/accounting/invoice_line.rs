// Copyright 2025 Cowboy AI, LLC.

//! Invoice lines and their tax components

use crate::collections::EntitySet;
use crate::config::FieldLimits;
use crate::decimal::Decimal;
use crate::entity::{DomainEntity, InvoiceLineMarker, TaxComponentMarker};
use crate::errors::{DomainError, DomainResult};
use crate::governance::access::TrackingAccess;
use crate::governance::tracking::{Tracking, TrackingEntity};
use crate::governance::write_once::{bind_to_parent, ensure_write_once};
use crate::identifiers::{InvoiceLineId, PostingId, RemittanceId, TaxComponentId};
use crate::validation::{require_text, Validate};
use serde::{Deserialize, Serialize};

/// How a line was settled
///
/// A line is settled by at most one of a journal posting or a remittance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineSettlement {
    /// Settled by a posting
    Posting(PostingId),
    /// Settled by a remittance
    Remittance(RemittanceId),
}

impl LineSettlement {
    /// The posting key, if settled by a posting
    pub fn posting_id(&self) -> Option<PostingId> {
        match self {
            LineSettlement::Posting(id) => Some(*id),
            LineSettlement::Remittance(_) => None,
        }
    }

    /// The remittance key, if settled by a remittance
    pub fn remittance_id(&self) -> Option<RemittanceId> {
        match self {
            LineSettlement::Remittance(id) => Some(*id),
            LineSettlement::Posting(_) => None,
        }
    }
}

/// A tax applied to an invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineTaxComponent {
    /// The key, present once stored
    pub id: TaxComponentId,
    /// Short description, e.g. `VAT 24%`
    pub description: String,
    /// Rate as a percent factor, if the tax is proportional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_percent_factor: Option<Decimal>,
    /// Tax amount
    pub amount: Decimal,
    /// How the tax was settled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<LineSettlement>,
    line_id: InvoiceLineId,
    tracking: Tracking,
}

impl InvoiceLineTaxComponent {
    /// Create a tax component of `amount`
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: TaxComponentId::UNSET,
            description: description.into(),
            rate_percent_factor: None,
            amount,
            settlement: None,
            line_id: InvoiceLineId::UNSET,
            tracking: Tracking::new(),
        }
    }

    /// Set the rate
    pub fn with_rate_percent_factor(mut self, rate: Decimal) -> Self {
        self.rate_percent_factor = Some(rate);
        self
    }

    /// Set the key
    pub fn with_id(mut self, id: TaxComponentId) -> Self {
        self.id = id;
        self
    }

    /// Key of the line the tax belongs to
    pub fn line_id(&self) -> InvoiceLineId {
        self.line_id
    }
}

impl DomainEntity for InvoiceLineTaxComponent {
    type IdType = TaxComponentMarker;

    fn id(&self) -> TaxComponentId {
        self.id
    }
}

impl TrackingEntity for InvoiceLineTaxComponent {
    fn tracking(&self) -> &Tracking {
        &self.tracking
    }
}

impl TrackingAccess for InvoiceLineTaxComponent {
    fn tracking_mut(&mut self) -> &mut Tracking {
        &mut self.tracking
    }
}

impl Validate for InvoiceLineTaxComponent {
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()> {
        require_text(
            "tax_component.description",
            &self.description,
            limits.tax_component_description,
        )
    }
}

/// A line of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// The key, present once stored
    pub id: InvoiceLineId,
    /// What was invoiced
    pub description: String,
    /// Quantity, if priced per unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    /// Unit rate, if priced per unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    /// Net amount
    pub amount: Decimal,
    /// How the line was settled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<LineSettlement>,
    #[serde(default)]
    tax_components: EntitySet<InvoiceLineTaxComponent>,
    tracking: Tracking,
}

impl InvoiceLine {
    /// Create a line with net `amount` and no taxes
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: InvoiceLineId::UNSET,
            description: description.into(),
            quantity: None,
            rate: None,
            amount,
            settlement: None,
            tax_components: EntitySet::new(),
            tracking: Tracking::new(),
        }
    }

    /// Set quantity and unit rate
    pub fn with_pricing(mut self, quantity: Decimal, rate: Decimal) -> Self {
        self.quantity = Some(quantity);
        self.rate = Some(rate);
        self
    }

    /// Set the key
    pub fn with_id(mut self, id: InvoiceLineId) -> Self {
        self.id = id;
        self
    }

    /// The tax components; empty by default
    pub fn tax_components(&self) -> &EntitySet<InvoiceLineTaxComponent> {
        &self.tax_components
    }

    /// Add a tax component, binding it to this line
    ///
    /// A component already bound to another line is rejected with
    /// [`DomainError::AccessDenied`].
    pub fn add_tax_component(&mut self, mut component: InvoiceLineTaxComponent) -> DomainResult<bool> {
        self.bind_component(&mut component)?;
        Ok(self.tax_components.insert(component))
    }

    /// Replace the tax components; `None` is rejected
    pub fn set_tax_components(
        &mut self,
        components: Option<EntitySet<InvoiceLineTaxComponent>>,
    ) -> DomainResult<()> {
        let components = components
            .ok_or_else(|| DomainError::invalid_argument("tax_components cannot be null"))?;
        let mut bound = EntitySet::new();
        for mut component in components {
            self.bind_component(&mut component)?;
            bound.insert(component);
        }
        self.tax_components = bound;
        Ok(())
    }

    /// Assign the key, binding every tax component to it
    ///
    /// The key is write-once. Nothing changes if a component already
    /// belongs to another line.
    pub fn set_id(&mut self, id: InvoiceLineId) -> DomainResult<()> {
        ensure_write_once(&self.id, &id, "invoice_line.id")?;
        for component in self.tax_components.iter() {
            ensure_write_once(&component.line_id, &id, "tax_component.line_id")?;
        }
        self.id = id;
        for component in self.tax_components.iter_mut() {
            bind_to_parent(&mut component.line_id, id, "tax_component.line_id")?;
        }
        Ok(())
    }

    /// Net amount plus every tax amount
    ///
    /// Fails with [`DomainError::ArithmeticOverflow`] when the exact total
    /// does not fit.
    pub fn gross_amount(&self) -> DomainResult<Decimal> {
        let taxes = self.tax_amount()?;
        self.amount.checked_add(taxes).ok_or_else(|| {
            DomainError::ArithmeticOverflow(format!(
                "gross amount of {} and taxes {taxes}",
                self.amount
            ))
        })
    }

    /// Sum of the tax amounts
    pub fn tax_amount(&self) -> DomainResult<Decimal> {
        self.tax_components
            .iter()
            .try_fold(Decimal::ZERO, |total, tax| {
                total.checked_add(tax.amount).ok_or_else(|| {
                    DomainError::ArithmeticOverflow(format!(
                        "tax total {total} plus {}",
                        tax.amount
                    ))
                })
            })
    }

    fn bind_component(&self, component: &mut InvoiceLineTaxComponent) -> DomainResult<()> {
        bind_to_parent(&mut component.line_id, self.id, "tax_component.line_id")
    }
}

impl DomainEntity for InvoiceLine {
    type IdType = InvoiceLineMarker;

    fn id(&self) -> InvoiceLineId {
        self.id
    }
}

impl TrackingEntity for InvoiceLine {
    fn tracking(&self) -> &Tracking {
        &self.tracking
    }
}

impl TrackingAccess for InvoiceLine {
    fn tracking_mut(&mut self) -> &mut Tracking {
        &mut self.tracking
    }
}

impl Validate for InvoiceLine {
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()> {
        require_text(
            "invoice_line.description",
            &self.description,
            limits.invoice_line_description,
        )?;
        self.tax_components
            .iter()
            .try_for_each(|tax| tax.validate(limits))
    }
}
