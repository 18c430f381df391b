mod common;

#[cfg(test)]
pub mod controller_tests {
    use serde_json::json;

    use super::common::*;

    use schoolpress::api::Method;
    use schoolpress::common::*;
    use schoolpress::models::*;
    use schoolpress::services::*;

    fn ids<R: Resource>(controller: &ResourceController<R>) -> Vec<i64> {
        controller.items().iter().map(|item| item.id().0).collect()
    }

    fn gallery_draft() -> GalleryDraft {
        GalleryDraft {
            image_url: "https://img.example.com/new.jpg".into(),
            title: Some("Open day".into()),
            category: Some("Events".into()),
        }
    }

    #[tokio::test]
    async fn test_load_replaces_list_in_server_order() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/news/", 200, json!([
            news_json(9, "Newest", "Sports"),
            news_json(4, "Older", "Academics"),
        ]));

        let mut controller = ResourceController::<NewsItem>::public(fake.client());
        assert_eq!(controller.view(), View::Idle);

        controller.load().await.unwrap();

        assert_eq!(controller.state(), &LoadState::Loaded);
        assert_eq!(ids(&controller), vec![9, 4]);
        assert!(matches!(controller.view(), View::Loaded(items) if items.len() == 2));
        assert_eq!(fake.requests()[0].bearer, None);
    }

    #[tokio::test]
    async fn test_load_failure_sets_failed_and_clears_list() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/gallery/", 200, seed_gallery());
        fake.respond(Method::Get, "/gallery/", 500, json!({"error": "database unavailable"}));

        let mut controller = ResourceController::<GalleryImage>::public(fake.client());
        controller.load().await.unwrap();
        assert_eq!(controller.items().len(), 4);

        let err = controller.load().await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(
            controller.state(),
            &LoadState::Failed("database unavailable".into())
        );
        assert!(controller.items().is_empty());
        assert_eq!(controller.view(), View::Failed("database unavailable"));
        assert!(controller.notices().iter().any(Notice::is_error));
    }

    #[tokio::test]
    async fn test_delete_then_load_excludes_id() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/gallery/", 200, seed_gallery());
        fake.respond(Method::Get, "/gallery/", 200, json!([
            gallery_json(1, "Sports day", "Sports"),
            gallery_json(3, "Football finals", "Sports"),
            gallery_json(4, "Prize giving", "Events"),
        ]));
        fake.respond(Method::Delete, "/gallery/2", 200, json!({"message": "Image deleted"}));

        let mut controller = ResourceController::<GalleryImage>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();

        controller.delete(ResourceId(2), |_| true).await.unwrap();
        assert_eq!(ids(&controller), vec![1, 3, 4]);
        assert!(!controller.is_saving(ResourceId(2)));

        controller.load().await.unwrap();
        assert!(!ids(&controller).contains(&2));

        let delete = fake
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Delete)
            .unwrap();
        assert_eq!(delete.bearer.as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/gallery/", 200, seed_gallery());

        let mut controller = ResourceController::<GalleryImage>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();

        let mut asked_about = String::new();
        let result = controller
            .delete(ResourceId(3), |item| {
                asked_about = item.title().to_string();
                false
            })
            .await;

        assert_eq!(result, Err(MutationError::Declined));
        assert_eq!(asked_about, "Football finals");
        assert_eq!(fake.count(Method::Delete, "/gallery/3"), 0);
        assert_eq!(controller.items().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/gallery/", 200, seed_gallery());
        fake.fail(Method::Delete, "/gallery/1", ApiError::Timeout);

        let mut controller = ResourceController::<GalleryImage>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();

        let result = controller.delete(ResourceId(1), |_| true).await;

        assert_eq!(result, Err(MutationError::Api(ApiError::Timeout)));
        assert_eq!(ids(&controller), vec![1, 2, 3, 4]);
        assert!(controller.notices().iter().any(Notice::is_error));
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/gallery/", 200, seed_gallery());

        let mut controller = ResourceController::<GalleryImage>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();

        let result = controller.delete(ResourceId(42), |_| true).await;
        assert_eq!(result, Err(MutationError::NotFound(ResourceId(42))));
        assert_eq!(fake.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_create_reloads_after_success() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/gallery/", 200, json!([gallery_json(1, "Sports day", "Sports")]));
        fake.respond(Method::Get, "/gallery/", 200, json!([
            gallery_json(5, "Open day", "Events"),
            gallery_json(1, "Sports day", "Sports"),
        ]));
        fake.respond(Method::Post, "/gallery/", 201, gallery_json(5, "Open day", "Events"));

        let mut controller = ResourceController::<GalleryImage>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();
        controller.open_modal();

        controller.create(gallery_draft()).await.unwrap();

        assert_eq!(ids(&controller), vec![5, 1]);
        assert!(controller.modal().is_none());
        assert!(!controller.is_creating());
        assert_eq!(fake.count(Method::Get, "/gallery/"), 2);
        assert!(controller.notices().iter().any(|n| !n.is_error()));

        let post = fake
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        assert_eq!(post.body.unwrap()["image_url"], "https://img.example.com/new.jpg");
    }

    #[tokio::test]
    async fn test_failed_create_keeps_length_and_modal() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/gallery/", 200, seed_gallery());
        fake.respond(Method::Post, "/gallery/", 500, json!({"error": "Failed to save image"}));

        let mut controller = ResourceController::<GalleryImage>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();
        let before = controller.items().len();

        let result = controller.create(gallery_draft()).await;

        assert!(matches!(result, Err(MutationError::Api(ApiError::Rejected { status: 500, .. }))));
        assert_eq!(controller.items().len(), before);
        assert_eq!(controller.modal().unwrap().draft, gallery_draft());
        assert!(controller
            .notices()
            .iter()
            .any(|n| n.is_error() && n.message.contains("Failed to save image")));
        assert_eq!(fake.count(Method::Get, "/gallery/"), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_never_sent() {
        let fake = FakeTransport::new();
        let mut controller = ResourceController::<NewsItem>::new(fake.client(), Some(session()));

        let result = controller.create(NewsDraft::default()).await;

        let errors = match result {
            Err(MutationError::Invalid(errors)) => errors,
            other => panic!("expected field errors, got {:?}", other),
        };
        assert!(errors.contains("title"));
        assert!(fake.requests().is_empty());

        let modal = controller.modal().unwrap();
        let title = modal.fields().into_iter().find(|f| f.name == "title").unwrap();
        assert_eq!(title.error.as_deref(), Some("Title is required"));
    }

    #[tokio::test]
    async fn test_update_stat_touches_only_that_item() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/stats/", 200, seed_stats());
        let mut echo = stat_json(3, "kcse_mean_grade", "B+", "academics");
        echo["updated_at"] = json!("2026-03-01T10:00:00");
        fake.respond(Method::Put, "/stats/3", 200, echo);

        let mut controller = ResourceController::<SchoolStat>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();
        let before = controller.items().to_vec();

        controller
            .update(ResourceId(3), StatPatch { stat_value: "B+".into() })
            .await
            .unwrap();

        let after = controller.items();
        assert_eq!(after.iter().filter(|s| s.stat_value == "B+").count(), 1);
        assert_eq!(after[2].id, ResourceId(3));
        assert_eq!(after[2].updated_at.to_string(), "2026-03-01 10:00:00");
        assert_eq!(&after[..2], &before[..2]);

        let put = fake
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Put)
            .unwrap();
        assert_eq!(put.body, Some(json!({"stat_value": "B+"})));
        assert_eq!(put.bearer.as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn test_update_without_echo_splices_patch() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/stats/", 200, seed_stats());
        fake.respond(Method::Put, "/stats/3", 200, json!({"message": "Stat updated"}));

        let mut controller = ResourceController::<SchoolStat>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();
        let old = controller.get(ResourceId(3)).unwrap().updated_at;

        controller
            .update(ResourceId(3), StatPatch { stat_value: "B+".into() })
            .await
            .unwrap();

        let stat = controller.get(ResourceId(3)).unwrap();
        assert_eq!(stat.stat_value, "B+");
        assert!(stat.updated_at > old);
        assert_eq!(controller.get(ResourceId(1)).unwrap().stat_value, "1200");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_item() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/stats/", 200, seed_stats());
        fake.respond(Method::Put, "/stats/3", 401, json!({"msg": "Token has expired"}));

        let mut controller = ResourceController::<SchoolStat>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();

        let err = controller
            .update(ResourceId(3), StatPatch { stat_value: "B+".into() })
            .await
            .unwrap_err();

        let MutationError::Api(api) = err else {
            panic!("expected an api error");
        };
        assert!(api.is_unauthorized());
        assert_eq!(controller.get(ResourceId(3)).unwrap().stat_value, "A-");
        assert!(!controller.is_saving(ResourceId(3)));
    }

    #[tokio::test]
    async fn test_mutation_needs_session() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/gallery/", 200, seed_gallery());

        let mut controller = ResourceController::<GalleryImage>::public(fake.client());
        controller.load().await.unwrap();

        let result = controller.delete(ResourceId(1), |_| true).await;
        assert_eq!(
            result,
            Err(MutationError::Api(ApiError::Session(SessionError::Missing)))
        );
        assert_eq!(fake.count(Method::Delete, "/gallery/1"), 0);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_sent() {
        let fake = FakeTransport::new();
        let mut controller =
            ResourceController::<ContactMessage>::new(fake.client(), Some(expired_session()));

        let err = controller.load().await.unwrap_err();

        assert_eq!(err, ApiError::Session(SessionError::Expired));
        assert!(err.is_unauthorized());
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_controller_issues_nothing() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/news/", 200, json!([]));

        let mut controller = ResourceController::<NewsItem>::public(fake.client());
        controller.cancel();

        let err = controller.load().await.unwrap_err();

        assert_eq!(err, ApiError::Cancelled);
        assert_eq!(controller.view(), View::Idle);
        assert!(controller.notices().is_empty());
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_mark_read_updates_inbox_row() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/contact/", 200, json!([{
            "id": 5,
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": null,
            "subject": "Admissions",
            "message": "Hello",
            "is_read": false,
            "created_at": "2026-03-01T08:00:00",
        }]));
        fake.respond(Method::Put, "/contact/5/read", 200, json!({"message": "Marked as read"}));

        let mut controller = ResourceController::<ContactMessage>::new(fake.client(), Some(session()));
        controller.load().await.unwrap();
        assert!(controller.get(ResourceId(5)).unwrap().is_unread());

        controller.mark_read(ResourceId(5)).await.unwrap();

        assert!(controller.get(ResourceId(5)).unwrap().is_read);
        assert_eq!(fake.count(Method::Put, "/contact/5/read"), 1);
    }

    #[tokio::test]
    async fn test_null_columns_load_as_defaults() {
        let fake = FakeTransport::new();
        let mut uncategorised = stat_json(4, "clubs_count", "32", "general");
        uncategorised["stat_category"] = serde_json::Value::Null;
        fake.respond(Method::Get, "/stats/", 200, json!([
            stat_json(1, "students_count", "1200", "students"),
            uncategorised,
        ]));
        fake.respond(Method::Get, "/contact/", 200, json!([{
            "id": 5,
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": null,
            "subject": null,
            "message": "Hello",
            "is_read": null,
            "created_at": "2026-03-01T08:00:00",
        }]));

        let mut stats = ResourceController::<SchoolStat>::public(fake.client());
        stats.load().await.unwrap();

        assert_eq!(stats.state(), &LoadState::Loaded);
        assert_eq!(ids(&stats), vec![1, 4]);
        let clubs = stats.get(ResourceId(4)).unwrap();
        assert_eq!(clubs.stat_category, "general");
        assert_eq!(clubs.category_kind(), StatCategory::General);

        let mut inbox = ResourceController::<ContactMessage>::new(fake.client(), Some(session()));
        inbox.load().await.unwrap();

        assert!(inbox.get(ResourceId(5)).unwrap().is_unread());
    }
}
