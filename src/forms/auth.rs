use crate::connectors::backend::{Credentials, UserMetadata};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct SignIn {
    #[validate(pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$")]
    pub email: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 72)]
    pub password: String,
}

impl From<&SignIn> for Credentials {
    fn from(form: &SignIn) -> Self {
        Credentials::new(form.email.clone(), form.password.clone())
    }
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct SignUp {
    #[validate(pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$")]
    pub email: String,
    #[validate(min_length = 6)]
    #[validate(max_length = 72)]
    pub password: String,
    #[validate(max_length = 32)]
    pub phone: Option<String>, // contact number, stored as user metadata
}

impl SignUp {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }

    pub fn metadata(&self) -> UserMetadata {
        UserMetadata {
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_requires_an_email_and_password() {
        let form = SignIn {
            email: "jane@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(form.validate().is_ok());

        let form = SignIn {
            email: "jane".to_string(),
            password: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn sign_up_password_has_a_minimum_length() {
        let form = SignUp {
            email: "jane@example.com".to_string(),
            password: "12345".to_string(),
            phone: None,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn blank_phone_is_not_sent_as_metadata() {
        let form = SignUp {
            email: "jane@example.com".to_string(),
            password: "123456".to_string(),
            phone: Some("   ".to_string()),
        };
        assert_eq!(form.metadata().phone, None);
    }
}
