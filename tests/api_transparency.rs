//! Integration tests per i record di trasparenza dei fondi

mod common;

#[cfg(test)]
mod transparency_tests {
    use super::common::*;
    use futures::future::join_all;
    use serde_json::{Value, json};
    use std::future::IntoFuture;

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let server = create_server().await;
        let ngo = seed_ngo(&server, "Light for All").await;
        let project = seed_campaign(&server, ngo, "Books", 100.0).await;

        server
            .get(&format!("/api/fund-transparencies/by-project/{project}"))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let server = create_server().await;
        let ngo = seed_ngo(&server, "Light for All").await;
        let project = seed_campaign(&server, ngo, "Books", 100.0).await;
        let path = format!("/api/fund-transparencies/by-project/{project}");

        let created: Value = server
            .put(&path)
            .json(&json!({ "additionalNotes": "Books delivered" }))
            .await
            .json();
        assert_eq!(created["additionalNotes"], "Books delivered");
        assert_eq!(created["isPublic"], true);
        assert_eq!(created["beforePhotos"], json!([]));

        let updated: Value = server
            .put(&path)
            .json(&json!({ "beneficiaryFeedback": "Thank you", "isPublic": false }))
            .await
            .json();
        assert_eq!(updated["transparencyId"], created["transparencyId"]);
        assert_eq!(updated["additionalNotes"], "Books delivered");
        assert_eq!(updated["beneficiaryFeedback"], "Thank you");
        assert_eq!(updated["isPublic"], false);

        let fetched: Value = server.get(&path).await.json();
        assert_eq!(fetched["beneficiaryFeedback"], "Thank you");
        assert_eq!(fetched["isPublic"], false);
    }

    #[tokio::test]
    async fn test_photos_append_and_remove() {
        let server = create_server().await;
        let ngo = seed_ngo(&server, "Light for All").await;
        let project = seed_campaign(&server, ngo, "Books", 100.0).await;
        let photos = format!("/api/fund-transparencies/by-project/{project}/photos");

        server
            .post(&photos)
            .json(&json!({ "kind": "BEFORE", "urls": ["/uploads/a.jpg", "/uploads/b.jpg"] }))
            .await
            .assert_status_ok();
        let record: Value = server
            .post(&photos)
            .json(&json!({ "kind": "AFTER", "urls": ["/uploads/c.jpg"] }))
            .await
            .json();
        assert_eq!(record["beforePhotos"], json!(["/uploads/a.jpg", "/uploads/b.jpg"]));
        assert_eq!(record["afterPhotos"], json!(["/uploads/c.jpg"]));

        let response = server
            .delete(&photos)
            .add_query_param("kind", "BEFORE")
            .add_query_param("url", "/uploads/a.jpg")
            .await;
        response.assert_status_ok();
        let record: Value = response.json();
        assert_eq!(record["beforePhotos"], json!(["/uploads/b.jpg"]));
        assert_eq!(record["afterPhotos"], json!(["/uploads/c.jpg"]));
    }

    #[tokio::test]
    async fn test_photo_upload_validation() {
        let server = create_server().await;
        let ngo = seed_ngo(&server, "Light for All").await;
        let project = seed_campaign(&server, ngo, "Books", 100.0).await;

        server
            .post(&format!("/api/fund-transparencies/by-project/{project}/photos"))
            .json(&json!({ "kind": "BEFORE", "urls": [] }))
            .await
            .assert_status_bad_request();

        server
            .post("/api/fund-transparencies/by-project/999/photos")
            .json(&json!({ "kind": "BEFORE", "urls": ["/x.jpg"] }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_photo_appends_are_all_kept() {
        let (server, _dir) = create_file_backed_server(5).await;
        let ngo = seed_ngo(&server, "Light for All").await;
        let project = seed_campaign(&server, ngo, "Books", 100.0).await;
        let photos = format!("/api/fund-transparencies/by-project/{project}/photos");

        let requests = (0..20).map(|i| {
            server
                .post(&photos)
                .json(&json!({ "kind": "BEFORE", "urls": [format!("/uploads/{i}.jpg")] }))
                .into_future()
        });
        let responses = join_all(requests).await;
        for response in &responses {
            response.assert_status_ok();
        }

        let record: Value = server
            .get(&format!("/api/fund-transparencies/by-project/{project}"))
            .await
            .json();
        let mut stored: Vec<String> = record["beforePhotos"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u.as_str().unwrap().to_string())
            .collect();
        stored.sort();
        let mut expected: Vec<String> = (0..20).map(|i| format!("/uploads/{i}.jpg")).collect();
        expected.sort();
        assert_eq!(stored, expected, "Nessuna foto deve andare persa");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_removals_and_appends() {
        let (server, _dir) = create_file_backed_server(5).await;
        let ngo = seed_ngo(&server, "Light for All").await;
        let project = seed_campaign(&server, ngo, "Books", 100.0).await;
        let photos = format!("/api/fund-transparencies/by-project/{project}/photos");
        let initial: Vec<String> = (0..10).map(|i| format!("/uploads/old-{i}.jpg")).collect();
        server
            .post(&photos)
            .json(&json!({ "kind": "AFTER", "urls": initial }))
            .await
            .assert_status_ok();

        let removals = initial.iter().map(|url| {
            server
                .delete(&photos)
                .add_query_param("kind", "AFTER")
                .add_query_param("url", url)
                .into_future()
        });
        let appends = (0..10).map(|i| {
            server
                .post(&photos)
                .json(&json!({ "kind": "AFTER", "urls": [format!("/uploads/new-{i}.jpg")] }))
                .into_future()
        });
        let (removed, appended) = futures::future::join(join_all(removals), join_all(appends)).await;
        for response in removed.iter().chain(appended.iter()) {
            response.assert_status_ok();
        }

        let record: Value = server
            .get(&format!("/api/fund-transparencies/by-project/{project}"))
            .await
            .json();
        let after = record["afterPhotos"].as_array().unwrap();
        assert_eq!(after.len(), 10);
        assert!(after.iter().all(|u| u.as_str().unwrap().contains("/new-")));
    }
}
