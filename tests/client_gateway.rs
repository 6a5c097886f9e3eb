//! Client tests: GatewayClient e view state contro un gateway reale in ascolto

mod common;

#[cfg(test)]
mod gateway_client_tests {
    use super::common::spawn_app;
    use bright_aid::client::views::{
        CampaignForm, InviteComposer, NgoRequestsPanel, RequestFilter, SchoolCampaignsView,
        SchoolRequestsPanel, TransparencyCard,
    };
    use bright_aid::client::{GatewayClient, GatewayError};
    use bright_aid::core::ClientConfig;
    use bright_aid::dtos::{CreateNgoDTO, CreateSchoolDTO};
    use bright_aid::entities::{Campaign, InvitationStatus, PhotoKind, School};
    use bright_aid::lifecycle::Decision;
    use std::time::Duration;

    struct World {
        client: GatewayClient,
        ngo_id: i64,
        campaign: Campaign,
        schools: Vec<School>,
    }

    async fn world() -> World {
        let base_url = spawn_app().await;
        let client = GatewayClient::new(ClientConfig::new(base_url)).unwrap();

        let ngo = client
            .create_ngo(&CreateNgoDTO {
                ngo_name: "Light for All".into(),
                user_id: Some(1),
            })
            .await
            .unwrap();

        let mut form = CampaignForm {
            project_name: "Books for Grade 5".into(),
            project_description: "Textbooks for rural schools".into(),
            budget: "2500".into(),
            ..CampaignForm::default()
        };
        let campaign = form.submit(&client, ngo.ngo_id).await.unwrap().unwrap();
        assert_eq!(form, CampaignForm::default(), "Il form si resetta dopo il salvataggio");

        let mut schools = Vec::new();
        for (name, district) in [("Riverside Primary", "Dhaka"), ("Hilltop High", "Sylhet")] {
            let school = client
                .create_school(&CreateSchoolDTO {
                    school_name: name.into(),
                    district: Some(district.into()),
                    upazila: None,
                    user_id: None,
                })
                .await
                .unwrap();
            schools.push(school);
        }

        World {
            client,
            ngo_id: ngo.ngo_id,
            campaign,
            schools,
        }
    }

    #[tokio::test]
    async fn test_composer_excludes_invited_school_and_reports_conflict() {
        let w = world().await;
        let school_id = w.schools[0].school_id;

        let mut composer = InviteComposer::load(&w.client, w.campaign.clone()).await.unwrap();
        assert_eq!(composer.candidates().len(), 2);
        assert_eq!(composer.budget, 2500.0);
        assert!(composer.select(school_id));

        let invitation = composer.submit(&w.client, Some(1)).await.unwrap();
        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert_eq!(
            invitation.request_message.as_deref(),
            Some("We invite you to join our campaign: Books for Grade 5")
        );
        assert!(composer.excluded.contains(&school_id));
        assert_eq!(composer.candidates().len(), 1);

        // a second composer opened before the first invitation still offers the school
        let mut stale = InviteComposer::open(w.campaign.clone(), w.schools.clone(), []);
        stale.select(school_id);
        let before = stale.clone();
        let err = stale.submit(&w.client, Some(1)).await.unwrap_err();

        assert!(matches!(err, GatewayError::Conflict { .. }));
        assert_eq!(err.status(), Some(reqwest::StatusCode::CONFLICT));
        assert!(stale.error.is_some());
        assert!(before.candidates().iter().any(|s| s.school_id == school_id));
        assert!(stale.excluded.contains(&school_id));
        assert_eq!(stale.selected_school_id, None);
        assert!(!stale.select(school_id), "La scuola non deve essere riproposta");
        assert!(!stale.submitting);
    }

    #[tokio::test]
    async fn test_composer_keeps_state_on_other_failures() {
        let w = world().await;
        let mut gone = w.campaign.clone();
        gone.ngo_project_id = 9999;
        let mut composer = InviteComposer::open(gone, w.schools.clone(), []);
        composer.select(w.schools[0].school_id);
        let before = composer.clone();

        let err = composer.submit(&w.client, Some(1)).await.unwrap_err();

        assert!(matches!(err, GatewayError::NotFound { .. }));
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert_eq!(composer.excluded, before.excluded);
        assert_eq!(composer.selected_school_id, before.selected_school_id);
        assert!(composer.error.is_some());
    }

    #[tokio::test]
    async fn test_reject_then_second_reject_is_stale() {
        let w = world().await;
        let school_id = w.schools[1].school_id;
        let mut composer = InviteComposer::load(&w.client, w.campaign.clone()).await.unwrap();
        composer.select(school_id);
        let invitation = composer.submit(&w.client, Some(1)).await.unwrap();

        let rejected = w
            .client
            .reject(invitation.request_id, 2, Some("Not this term".into()))
            .await
            .unwrap();
        assert_eq!(rejected.status, InvitationStatus::Rejected);
        assert_eq!(rejected.response_message.as_deref(), Some("Not this term"));

        let err = w
            .client
            .reject(invitation.request_id, 2, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidTransition { .. }));
        assert_eq!(err.status(), Some(reqwest::StatusCode::CONFLICT));

        // a rejected school can be offered again
        let excluded = w.client.excluded_schools(w.campaign.ngo_project_id).await.unwrap();
        assert!(!excluded.contains(&school_id));
        assert!(w.client.school_conversations(school_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_school_panel_approve_then_stale_response() {
        let w = world().await;
        let school_id = w.schools[0].school_id;
        let mut composer = InviteComposer::load(&w.client, w.campaign.clone()).await.unwrap();
        composer.select(school_id);
        let invitation = composer.submit(&w.client, Some(1)).await.unwrap();

        let mut panel = SchoolRequestsPanel::load(&w.client, school_id).await.unwrap();
        let mut other_device = panel.clone();
        assert_eq!(panel.counts().pending, 1);

        panel.select(invitation.request_id);
        let approved = panel
            .respond(&w.client, invitation.request_id, Decision::Approve, 2)
            .await
            .unwrap();
        assert_eq!(approved.status, InvitationStatus::Approved);
        assert_eq!(approved.response_message.as_deref(), Some("Invitation accepted"));
        assert_eq!(panel.invitations[0], approved);
        assert_eq!(panel.counts().approved, 1);
        panel.set_filter(RequestFilter::Pending);
        assert!(panel.visible().is_empty());

        // the same invitation answered from an outdated copy of the panel
        let before = other_device.clone();
        let err = other_device
            .respond(&w.client, invitation.request_id, Decision::Reject, 2)
            .await
            .unwrap_err();
        assert!(err.needs_refresh());
        assert!(other_device.stale);
        assert_eq!(other_device.invitations, before.invitations);
        assert_eq!(
            other_device.error.as_deref(),
            Some("The invitation state has changed, please refresh.")
        );

        let conversations = w.client.school_conversations(school_id).await.unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].ngo_id, w.ngo_id);
    }

    #[tokio::test]
    async fn test_accepted_campaigns_view_follows_approval() {
        let w = world().await;
        let school_id = w.schools[1].school_id;
        let mut composer = InviteComposer::load(&w.client, w.campaign.clone()).await.unwrap();
        composer.select(school_id);
        let invitation = composer.submit(&w.client, Some(1)).await.unwrap();

        let mut view = SchoolCampaignsView::load(&w.client, school_id).await.unwrap();
        assert!(view.accepted().is_empty());

        w.client.approve(invitation.request_id, 2, None).await.unwrap();
        view.refresh_invitations(&w.client).await.unwrap();

        let accepted: Vec<i64> = view.accepted().iter().map(|c| c.ngo_project_id).collect();
        assert_eq!(accepted, vec![w.campaign.ngo_project_id]);
        let server_side = w.client.accepted_campaigns(school_id).await.unwrap();
        assert_eq!(server_side.len(), 1);

        let ngo_panel = NgoRequestsPanel::load(&w.client, w.campaign.ngo_project_id)
            .await
            .unwrap();
        assert_eq!(ngo_panel.counts().approved, 1);
    }

    #[tokio::test]
    async fn test_transparency_card_lifecycle() {
        let w = world().await;
        let mut card = TransparencyCard::open(w.campaign.ngo_project_id);

        card.load(&w.client).await.unwrap();
        assert!(card.is_missing());

        card.add_photos(&w.client, PhotoKind::Before, vec!["/uploads/a.jpg".into()])
            .await
            .unwrap();
        assert_eq!(
            card.record().map(|r| r.before_photos.clone()),
            Some(vec!["/uploads/a.jpg".to_string()])
        );

        card.remove_photo(&w.client, PhotoKind::Before, "/uploads/a.jpg")
            .await
            .unwrap();
        assert!(card.is_empty());

        let mut unknown = TransparencyCard::open(9999);
        let err = unknown
            .add_photos(&w.client, PhotoKind::After, vec!["/x.jpg".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotFound { .. }));
        assert_eq!(unknown.record(), None);
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_transport_error() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9/api".into(),
            timeout: Duration::from_secs(2),
        };
        let client = GatewayClient::new(config).unwrap();

        let err = client.list_schools().await.unwrap_err();

        assert!(err.is_transport());
        assert!(!err.needs_refresh());
    }
}
