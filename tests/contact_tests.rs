mod common;

#[cfg(test)]
pub mod contact_tests {
    use serde_json::json;

    use super::common::*;

    use schoolpress::api::Method;
    use schoolpress::common::*;
    use schoolpress::models::ContactForm;
    use schoolpress::services::*;

    fn jane() -> ContactForm {
        ContactForm {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: None,
            subject: "Admissions".into(),
            message: "Hello".into(),
        }
    }

    #[tokio::test]
    async fn test_blank_name_is_caught_before_sending() {
        let fake = FakeTransport::new();
        let mut controller = ContactFormController::with_values(
            fake.client(),
            ContactForm {
                name: String::new(),
                ..jane()
            },
        );

        let result = controller.submit().await;

        assert!(matches!(result, Err(MutationError::Invalid(_))));
        assert_eq!(controller.errors().get("name"), Some("Name is required"));
        assert_eq!(controller.errors().len(), 1);
        assert_eq!(controller.phase(), ContactPhase::Editing);
        assert_eq!(controller.form().email, "jane@x.com");
        assert_eq!(controller.form().message, "Hello");
        assert!(fake.requests().is_empty());

        let name = controller.fields().into_iter().find(|f| f.name == "name").unwrap();
        assert_eq!(name.error.as_deref(), Some("Name is required"));
    }

    #[tokio::test]
    async fn test_valid_message_is_sent_once_without_token() {
        let fake = FakeTransport::new();
        fake.respond(Method::Post, "/contact/", 201, json!({"message": "ok"}));

        let mut controller = ContactFormController::new(fake.client());
        controller.edit("name", "Jane Doe");
        controller.edit("email", "jane@x.com");
        controller.edit("subject", "Admissions");
        controller.edit("message", "Hello");

        controller.submit().await.unwrap();

        assert!(controller.is_submitted());
        assert_eq!(controller.confirmation(), Some("ok"));
        assert!(controller.notice().is_none());

        let requests = fake.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/contact/");
        assert_eq!(requests[0].bearer, None);

        let body = requests[0].body.clone().unwrap();
        assert_eq!(body["name"], "Jane Doe");
        assert_eq!(body["email"], "jane@x.com");
        assert!(body.get("phone").is_none());

        // A submitted form is frozen until reset.
        controller.edit("name", "Someone else");
        controller.submit().await.unwrap();
        assert_eq!(controller.form().name, "Jane Doe");
        assert_eq!(fake.requests().len(), 1);

        controller.reset();
        assert_eq!(controller.phase(), ContactPhase::Editing);
        assert_eq!(controller.form(), &ContactForm::default());
    }

    #[tokio::test]
    async fn test_edit_clears_only_that_field() {
        let fake = FakeTransport::new();
        let mut controller = ContactFormController::new(fake.client());

        let _ = controller.submit().await;
        assert!(controller.errors().contains("name"));
        assert!(controller.errors().contains("email"));

        controller.edit("name", "Jane Doe");

        assert!(!controller.errors().contains("name"));
        assert!(controller.errors().contains("email"));
        assert!(controller.errors().contains("subject"));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_returns_to_editing() {
        let fake = FakeTransport::new();
        fake.respond(Method::Post, "/contact/", 500, json!({"error": "Failed to send message"}));

        let mut controller = ContactFormController::with_values(fake.client(), jane());
        let result = controller.submit().await;

        assert!(matches!(
            result,
            Err(MutationError::Api(ApiError::Rejected { status: 500, .. }))
        ));
        assert_eq!(controller.phase(), ContactPhase::Editing);
        assert_eq!(controller.notice().unwrap().message, "Failed to send message");
        assert_eq!(controller.form(), &jane());
    }

    #[tokio::test]
    async fn test_unreachable_server_gets_generic_notice() {
        let fake = FakeTransport::new();
        fake.fail(Method::Post, "/contact/", ApiError::Transport("connection refused".into()));

        let mut controller = ContactFormController::with_values(fake.client(), jane());
        let _ = controller.submit().await;

        let notice = controller.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to send message. Please try again.");
        assert!(!controller.is_submitted());
    }

    #[tokio::test]
    async fn test_email_required_and_length_messages() {
        let fake = FakeTransport::new();
        let mut controller = ContactFormController::with_values(
            fake.client(),
            ContactForm {
                email: "   ".into(),
                ..jane()
            },
        );

        let _ = controller.submit().await;
        assert_eq!(controller.errors().get("email"), Some("Email is required"));
        assert_eq!(controller.errors().len(), 1);

        let long = format!("a@{}.ke", "x".repeat(252));
        assert_eq!(long.chars().count(), 256);
        controller.edit("email", &long);
        let _ = controller.submit().await;
        assert_eq!(
            controller.errors().get("email"),
            Some("Email must be at most 255 characters")
        );

        assert!(fake.requests().is_empty());

        fake.respond(Method::Post, "/contact/", 201, json!({"message": "ok"}));
        let widest = format!("a@{}.ke", "x".repeat(251));
        controller.edit("email", &widest);
        controller.submit().await.unwrap();
        assert!(controller.is_submitted());
        assert_eq!(fake.requests()[0].body.clone().unwrap()["email"], widest);
    }
}
