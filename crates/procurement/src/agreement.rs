use chrono::NaiveDate;
use serde::Serialize;

use supplyline_core::Entity;

use crate::error::{ProcurementError, ProcurementResult};
use crate::ids::{AgreementId, PlantId, VendorId};

/// Inclusive date range `[start, end]` during which an agreement's orders and
/// deliveries must fall.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    #[serde(rename = "agreement_start")]
    start: NaiveDate,
    #[serde(rename = "agreement_end")]
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ProcurementResult<Self> {
        if start > end {
            return Err(ProcurementError::InvalidAgreementWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Purchase agreement: a contracted quantity ceiling for a plant-vendor pair.
///
/// Orders placed against the agreement reference it by id; the agreement does
/// not own them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agreement {
    #[serde(rename = "agreement_id")]
    pub id: AgreementId,
    pub plant_id: PlantId,
    pub vendor_id: VendorId,
    pub agreement_date: NaiveDate,
    #[serde(flatten)]
    pub window: DateWindow,
    pub quantity: i64,
}

/// Agreement awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgreement {
    pub plant_id: PlantId,
    pub vendor_id: VendorId,
    pub agreement_date: NaiveDate,
    pub window: DateWindow,
    pub quantity: i64,
}

impl NewAgreement {
    pub fn into_agreement(self, id: AgreementId) -> Agreement {
        Agreement {
            id,
            plant_id: self.plant_id,
            vendor_id: self.vendor_id,
            agreement_date: self.agreement_date,
            window: self.window,
            quantity: self.quantity,
        }
    }
}

impl Entity for Agreement {
    type Id = AgreementId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
