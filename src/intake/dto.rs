use serde::Deserialize;

/// Intake form submitted by a prospective pet owner. Wire format is camelCase,
/// matching the site's form field names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IntakeForm {
    pub name: String,
    pub pet_name: String,
    /// Age bracket chosen from the form's dropdown, stored as given.
    pub age: String,
    pub gender: String,
    pub category: String,
    pub phone: String,
    pub email: String,
    pub pickup_date: String,
}

#[derive(Debug, Deserialize)]
pub struct OwnerFilter {
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_form_uses_camel_case_field_names() {
        let body = r#"{
            "name": "Ana",
            "petName": "Mochi",
            "age": "18-25",
            "gender": "female",
            "category": "cat",
            "phone": "0812345678",
            "email": "ana@x.com",
            "pickupDate": "2026-09-01"
        }"#;
        let form: IntakeForm = serde_json::from_str(body).expect("deserialize");
        assert_eq!(form.pet_name, "Mochi");
        assert_eq!(form.pickup_date, "2026-09-01");
    }

    #[test]
    fn intake_form_rejects_missing_fields() {
        let body = r#"{"name":"Ana","petName":"Mochi"}"#;
        assert!(serde_json::from_str::<IntakeForm>(body).is_err());
    }
}
