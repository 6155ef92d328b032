//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable DATABASE_URL (JWT_SECRET is optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_prayer_routes_require_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/prayer").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let foreign = prayer_common::JwtService::new("some-other-secret", 900);
    let token = foreign
        .issue_access_token(prayer_core::Snowflake::new(1))
        .unwrap();

    let response = server.get_auth("/api/v1/prayer", &token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

// ============================================================================
// Prayer Request Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_prayer_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.create_user("asker").await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/prayer",
            &user.token,
            &CreatePrayerRequest::new("Healing for my mother"),
        )
        .await
        .unwrap();
    let created: PrayerRequestBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.request, "Healing for my mother");
    assert!(created.is_anonymous);
    assert_eq!(created.prayer_count, 0);
    assert_eq!(created.status, "pending");

    let response = server
        .get_auth(&format!("/api/v1/prayer/{}", created.id), &user.token)
        .await
        .unwrap();
    let fetched: PrayerRequestBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, created.id);

    let response = server
        .get_auth("/api/v1/prayer/my-requests", &user.token)
        .await
        .unwrap();
    let mine: Vec<PrayerRequestBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, created.id);
}

#[tokio::test]
async fn test_empty_request_text_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.create_user("blank").await.unwrap();

    let response = server
        .post_auth("/api/v1/prayer", &user.token, &CreatePrayerRequest::new(""))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_prayer_request_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.create_user("lost").await.unwrap();

    let response = server
        .get_auth("/api/v1/prayer/1", &user.token)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "UNKNOWN_PRAYER_REQUEST");
}

#[tokio::test]
async fn test_pray_then_answer() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.create_user("owner").await.unwrap();
    let friend = server.create_user("friend").await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/prayer",
            &owner.token,
            &CreatePrayerRequest::new("A new job"),
        )
        .await
        .unwrap();
    let request: PrayerRequestBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Praying once bumps the counter
    let response = server
        .post_empty_auth(
            &format!("/api/v1/prayer/{}/pray", request.id),
            &friend.token,
        )
        .await
        .unwrap();
    let prayed: PrayerRequestBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(prayed.prayer_count, 1);

    // Praying twice is a conflict and leaves the counter alone
    let response = server
        .post_empty_auth(
            &format!("/api/v1/prayer/{}/pray", request.id),
            &friend.token,
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.code, "ALREADY_PRAYED");

    let response = server
        .get_auth(
            &format!("/api/v1/prayer/{}/prayers", request.id),
            &owner.token,
        )
        .await
        .unwrap();
    let logs: Vec<PrayerLogBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, friend.id.to_string());

    let response = server
        .get_auth("/api/v1/prayer/my-prayers", &friend.token)
        .await
        .unwrap();
    let history: Vec<PrayerLogBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].prayer_request_id, request.id);
    assert!(history[0].prayer_request.is_some());

    // Only the owner may answer
    let answer = MarkAnswered {
        testimony: "Started Monday".to_string(),
    };
    let response = server
        .post_auth(
            &format!("/api/v1/prayer/{}/answer", request.id),
            &friend.token,
            &answer,
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "NOT_REQUEST_OWNER");

    let response = server
        .post_auth(
            &format!("/api/v1/prayer/{}/answer", request.id),
            &owner.token,
            &answer,
        )
        .await
        .unwrap();
    let answered: PrayerRequestBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(answered.status, "answered");
    assert_eq!(answered.answer_testimony.as_deref(), Some("Started Monday"));
    assert!(answered.answered_at.is_some());

    let response = server
        .post_auth(
            &format!("/api/v1/prayer/{}/answer", request.id),
            &owner.token,
            &answer,
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.code, "ALREADY_ANSWERED");

    let response = server
        .get_auth("/api/v1/prayer/answered", &friend.token)
        .await
        .unwrap();
    let answered: Vec<PrayerRequestBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(answered.iter().any(|r| r.id == request.id));
}

#[tokio::test]
async fn test_delete_hides_prayer_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.create_user("deleter").await.unwrap();
    let other = server.create_user("bystander").await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/prayer",
            &owner.token,
            &CreatePrayerRequest::new("Short lived"),
        )
        .await
        .unwrap();
    let request: PrayerRequestBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/v1/prayer/{}", request.id);

    let response = server.delete_auth(&path, &other.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN)
        .await
        .unwrap();

    let response = server.delete_auth(&path, &owner.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT)
        .await
        .unwrap();

    let response = server.get_auth(&path, &owner.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND)
        .await
        .unwrap();
}

// ============================================================================
// Prayer Chain Tests
// ============================================================================

#[tokio::test]
async fn test_chain_membership_and_commitments() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.create_user("alice").await.unwrap();
    let bob = server.create_user("bob").await.unwrap();
    let carol = server.create_user("carol").await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/prayer-chains",
            &alice.token,
            &CreatePrayerChain::unique(),
        )
        .await
        .unwrap();
    let chain: PrayerChainBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(chain.member_count, 1);
    assert_eq!(chain.created_by_user_id, alice.id.to_string());

    let join = format!("/api/v1/prayer-chains/{}/join", chain.id);
    let response = server.post_empty_auth(&join, &bob.token).await.unwrap();
    let _: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.post_empty_auth(&join, &bob.token).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.code, "ALREADY_MEMBER");

    // Carol is not a member yet, so nobody may commit to her
    let commit_to_carol = CommitToPray {
        chain_id: chain.id.clone(),
        pray_for_user_id: carol.id.to_string(),
    };
    let response = server
        .post_auth(
            "/api/v1/prayer-chains/commit",
            &alice.token,
            &commit_to_carol,
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(error.code, "TARGET_NOT_MEMBER");

    let self_commit = CommitToPray {
        chain_id: chain.id.clone(),
        pray_for_user_id: alice.id.to_string(),
    };
    let response = server
        .post_auth("/api/v1/prayer-chains/commit", &alice.token, &self_commit)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(error.code, "SELF_COMMITMENT");

    let commit_to_bob = CommitToPray {
        chain_id: chain.id.clone(),
        pray_for_user_id: bob.id.to_string(),
    };
    let response = server
        .post_auth("/api/v1/prayer-chains/commit", &alice.token, &commit_to_bob)
        .await
        .unwrap();
    let commitment: CommitmentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(commitment.chain_id, chain.id);
    assert_eq!(commitment.pray_for_user_id, bob.id.to_string());

    let response = server
        .post_auth("/api/v1/prayer-chains/commit", &alice.token, &commit_to_bob)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.code, "DUPLICATE_COMMITMENT");

    // Details carry the member roster with usernames and commitments
    let response = server
        .get_auth(&format!("/api/v1/prayer-chains/{}", chain.id), &carol.token)
        .await
        .unwrap();
    let detail: ChainDetailBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.id, chain.id);
    assert_eq!(detail.member_count, 2);
    assert_eq!(
        detail.creator.as_ref().map(|c| c.username.as_str()),
        Some(alice.username.as_str())
    );
    let alice_entry = detail
        .members
        .iter()
        .find(|m| m.user_id == alice.id.to_string())
        .expect("creator listed as member");
    assert_eq!(alice_entry.commitments.len(), 1);
    assert_eq!(
        alice_entry.commitments[0]
            .pray_for_user
            .as_ref()
            .map(|u| u.id.as_str()),
        Some(bob.id.to_string().as_str())
    );

    // Leaving drops the member and every commitment that names them
    let response = server
        .post_empty_auth(
            &format!("/api/v1/prayer-chains/{}/leave", chain.id),
            &bob.token,
        )
        .await
        .unwrap();
    let _: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/prayer-chains/{}", chain.id), &alice.token)
        .await
        .unwrap();
    let detail: ChainDetailBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.member_count, 1);
    assert_eq!(detail.members.len(), 1);
    assert!(detail.members[0].commitments.is_empty());

    let response = server
        .post_empty_auth(
            &format!("/api/v1/prayer-chains/{}/leave", chain.id),
            &bob.token,
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(error.code, "NOT_MEMBER");
}

#[tokio::test]
async fn test_remove_commitment() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.create_user("remover").await.unwrap();
    let bob = server.create_user("target").await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/prayer-chains",
            &alice.token,
            &CreatePrayerChain::unique(),
        )
        .await
        .unwrap();
    let chain: PrayerChainBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .post_empty_auth(
            &format!("/api/v1/prayer-chains/{}/join", chain.id),
            &bob.token,
        )
        .await
        .unwrap();

    let commit = CommitToPray {
        chain_id: chain.id.clone(),
        pray_for_user_id: bob.id.to_string(),
    };
    let response = server
        .post_auth("/api/v1/prayer-chains/commit", &alice.token, &commit)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/prayer-chains/{}/commit/{}", chain.id, bob.id);
    let response = server.delete_auth(&path, &alice.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT)
        .await
        .unwrap();

    // Removing again is a no-op
    let response = server.delete_auth(&path, &alice.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT)
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/prayer-chains/my-chains", &bob.token)
        .await
        .unwrap();
    let chains: Vec<PrayerChainBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(chains.iter().any(|c| c.id == chain.id));
}

#[tokio::test]
async fn test_unknown_chain_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.create_user("wanderer").await.unwrap();

    let response = server
        .post_empty_auth("/api/v1/prayer-chains/1/join", &user.token)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "UNKNOWN_PRAYER_CHAIN");
}
