//! Integration tests for the comment vote ledger against a real SQLite
//! database.
//!
//! Covers the toggle / flip state machine, score consistency, the
//! one-vote-per-(comment, ip) invariant and concurrent voting.

use std::net::{IpAddr, Ipv4Addr};

use assert_matches::assert_matches;
use quill_core::types::DbId;
use quill_core::vote::{VoteTransition, VoteValue};
use quill_core::voter::VoterIp;
use quill_db::models::article::CreateArticle;
use quill_db::models::comment::CreateComment;
use quill_db::models::user::CreateUser;
use quill_db::repositories::{ArticleRepo, CommentRepo, UserRepo, VoteRepo};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ip(last: u8) -> VoterIp {
    VoterIp::from_addr(Some(IpAddr::V4(Ipv4Addr::new(192, 168, 0, last))))
}

/// Create a user, an article and a comment; return the comment id.
async fn seed_comment(pool: &SqlitePool) -> DbId {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "voter_host".to_string(),
            email: "voter_host@test.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap();

    let article = ArticleRepo::create(
        pool,
        user.id,
        &CreateArticle {
            title: "Ledger".to_string(),
            perex: "Votes".to_string(),
            content: "Body".to_string(),
        },
    )
    .await
    .unwrap();

    CommentRepo::create(
        pool,
        &CreateComment {
            article_id: article.id,
            content: "Vote on me".to_string(),
            user_id: user.id,
        },
    )
    .await
    .unwrap()
    .expect("article exists")
    .id
}

async fn rows_for(pool: &SqlitePool, comment_id: DbId, voter: &VoterIp) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM votes WHERE comment_id = $1 AND ip_address = $2")
            .bind(comment_id)
            .bind(voter.as_str())
            .fetch_one(pool)
            .await
            .unwrap();
    count
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_first_vote_inserts(pool: SqlitePool) {
    let comment_id = seed_comment(&pool).await;

    let cast = VoteRepo::cast(&pool, comment_id, VoteValue::Up, &ip(1))
        .await
        .unwrap()
        .expect("comment exists");

    assert_eq!(cast.transition, VoteTransition::Insert(VoteValue::Up));
    assert_eq!(cast.comment.score, 1);
    assert_eq!(cast.comment.votes.len(), 1);
    assert_eq!(cast.comment.votes[0].ip_address, "192.168.0.1");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_same_vote_twice_retracts(pool: SqlitePool) {
    let comment_id = seed_comment(&pool).await;
    let voter = ip(2);

    VoteRepo::cast(&pool, comment_id, VoteValue::Up, &voter)
        .await
        .unwrap();
    let second = VoteRepo::cast(&pool, comment_id, VoteValue::Up, &voter)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(second.transition, VoteTransition::Retract);
    assert_eq!(second.comment.score, 0, "toggle must return to the pre-vote score");
    assert_eq!(rows_for(&pool, comment_id, &voter).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_opposite_vote_flips_in_place(pool: SqlitePool) {
    let comment_id = seed_comment(&pool).await;
    let voter = ip(3);

    let first = VoteRepo::cast(&pool, comment_id, VoteValue::Up, &voter)
        .await
        .unwrap()
        .unwrap();
    let first_row_id = first.comment.votes[0].id;

    let second = VoteRepo::cast(&pool, comment_id, VoteValue::Down, &voter)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(second.transition, VoteTransition::Flip(VoteValue::Down));
    assert_eq!(second.comment.score - first.comment.score, -2);
    assert_eq!(second.comment.votes.len(), 1);
    assert_eq!(second.comment.votes[0].id, first_row_id, "flip keeps row identity");
    assert_eq!(rows_for(&pool, comment_id, &voter).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_downvote_toggle_and_flip(pool: SqlitePool) {
    let comment_id = seed_comment(&pool).await;
    let voter = ip(4);

    let down = VoteRepo::cast(&pool, comment_id, VoteValue::Down, &voter)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(down.comment.score, -1);

    let up = VoteRepo::cast(&pool, comment_id, VoteValue::Up, &voter)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(up.transition, VoteTransition::Flip(VoteValue::Up));
    assert_eq!(up.comment.score, 1);

    let retracted = VoteRepo::cast(&pool, comment_id, VoteValue::Up, &voter)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(retracted.comment.score, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_comment_returns_none(pool: SqlitePool) {
    let result = VoteRepo::cast(&pool, 424_242, VoteValue::Up, &ip(5))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_score_matches_vote_sum_after_every_operation(pool: SqlitePool) {
    let comment_id = seed_comment(&pool).await;
    let script = [
        (1, VoteValue::Up),
        (2, VoteValue::Up),
        (3, VoteValue::Down),
        (1, VoteValue::Down),
        (2, VoteValue::Up),
        (3, VoteValue::Down),
        (4, VoteValue::Up),
    ];

    for (voter, value) in script {
        let cast = VoteRepo::cast(&pool, comment_id, value, &ip(voter))
            .await
            .unwrap()
            .unwrap();
        let (sum,): (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(value), 0) FROM votes WHERE comment_id = $1")
                .bind(comment_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(cast.comment.score, sum);
    }

    // 1: down, 2: retracted, 3: retracted, 4: up
    let final_comment = CommentRepo::find_detail(&pool, comment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(final_comment.score, 0);
    assert_eq!(final_comment.votes.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_voter_is_a_single_key(pool: SqlitePool) {
    let comment_id = seed_comment(&pool).await;
    let anonymous = VoterIp::from_addr(None);

    VoteRepo::cast(&pool, comment_id, VoteValue::Up, &anonymous)
        .await
        .unwrap();
    let second = VoteRepo::cast(&pool, comment_id, VoteValue::Up, &VoterIp::from_addr(None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(second.transition, VoteTransition::Retract);
    assert_eq!(second.comment.score, 0);
}

// ---------------------------------------------------------------------------
// Uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_slot_is_rejected_by_schema(pool: SqlitePool) {
    let comment_id = seed_comment(&pool).await;

    let insert = "INSERT INTO votes (value, ip_address, comment_id) VALUES ($1, $2, $3)";
    sqlx::query(insert)
        .bind(1_i64)
        .bind("127.0.0.1")
        .bind(comment_id)
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query(insert)
        .bind(-1_i64)
        .bind("127.0.0.1")
        .bind(comment_id)
        .execute(&pool)
        .await
        .unwrap_err();

    assert_matches!(err, sqlx::Error::Database(ref db) if db.is_unique_violation());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_value_is_rejected_by_schema(pool: SqlitePool) {
    let comment_id = seed_comment(&pool).await;

    let result =
        sqlx::query("INSERT INTO votes (value, ip_address, comment_id) VALUES (2, 'x', $1)")
            .bind(comment_id)
            .execute(&pool)
            .await;

    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

/// Open a file-backed pool the way the server does, so concurrent writers
/// really contend for the SQLite write lock.
async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let url = format!("sqlite://{}", dir.path().join("ledger.db").display());
    let pool = quill_db::create_pool(&url).await.unwrap();
    quill_db::run_migrations(&pool).await.unwrap();
    pool
}

/// Identical requests from one voter, spawned across worker threads, must
/// all be applied one after another. An odd number of toggles leaves exactly
/// one upvote behind.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_votes_all_apply() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;
    let comment_id = seed_comment(&pool).await;
    let voter = VoterIp::from_addr(None);

    for round in 0..3 {
        let requests = 41;
        let handles: Vec<_> = (0..requests)
            .map(|_| {
                let pool = pool.clone();
                let voter = voter.clone();
                tokio::spawn(async move {
                    VoteRepo::cast(&pool, comment_id, VoteValue::Up, &voter).await
                })
            })
            .collect();

        for handle in handles {
            let cast = handle
                .await
                .unwrap()
                .unwrap_or_else(|e| panic!("round {round}: vote failed: {e}"))
                .expect("comment exists");
            assert!(cast.comment.votes.len() <= 1);
            assert!((0..=1).contains(&cast.comment.score));
        }

        // Each round is an odd number of toggles, so the slot alternates.
        let expected = if round % 2 == 0 { 1 } else { 0 };
        assert_eq!(rows_for(&pool, comment_id, &voter).await, expected);
    }

    let detail = CommentRepo::find_detail(&pool, comment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.score, 1);
    assert_eq!(detail.votes[0].value, 1);

    pool.close().await;
}
