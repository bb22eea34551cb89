//! Vet visits and the clinic that handled them

/// Clinic details attached to a visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicInfo {
    pub clinic_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub doctor_name: Option<String>,
}

impl ClinicInfo {
    pub fn new(clinic_name: impl Into<String>) -> Self {
        Self {
            clinic_name: clinic_name.into(),
            address: None,
            phone: None,
            doctor_name: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_doctor(mut self, doctor_name: impl Into<String>) -> Self {
        self.doctor_name = Some(doctor_name.into());
        self
    }
}

/// A single visit to the vet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VetVisit {
    /// ISO date of the visit
    pub date: String,
    /// e.g. "Vaccination", "Checkup"
    pub reason: String,
    pub notes: Option<String>,
    pub clinic_info: Option<ClinicInfo>,
}

impl VetVisit {
    pub fn new(date: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            reason: reason.into(),
            notes: None,
            clinic_info: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_clinic(mut self, clinic: ClinicInfo) -> Self {
        self.clinic_info = Some(clinic);
        self
    }
}
