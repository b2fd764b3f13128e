// src/loader.rs

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::AppError,
    models::{
        comment::Comment,
        post::{Post, PostPayload},
    },
    utils::date::today,
};

/// Where a page gets its post and comments from, keyed by route id.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn load(&self, id: &str) -> Result<PostPayload, AppError>;
}

/// Synthesizes a post for any id, with a random upvote count and two
/// fixed seed comments. Never fails for a valid id.
pub struct MockPostSource {
    rng: Mutex<StdRng>,
    upvote_seed_max: u64,
}

impl MockPostSource {
    pub fn new(upvote_seed_max: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            upvote_seed_max: upvote_seed_max.max(1),
        }
    }

    /// Deterministic upvote seeds, for tests.
    pub fn with_seed(upvote_seed_max: u64, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            upvote_seed_max: upvote_seed_max.max(1),
        }
    }

    fn upvote_seed(&self) -> Result<u64, AppError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        Ok(rng.gen_range(0..self.upvote_seed_max))
    }
}

#[async_trait]
impl PostSource for MockPostSource {
    async fn load(&self, id: &str) -> Result<PostPayload, AppError> {
        let post = Post {
            id: id.to_string(),
            tag: format!("Post tag {}", id),
            title: format!("Post Title {}", id),
            content: format!(
                "This is the content of post {}. We will fetch the content from back end using the id in url for actual work.",
                id
            ),
            upvotes: self.upvote_seed()?,
            created_at: today(),
        };

        tracing::debug!("Synthesized post {} with {} upvotes", id, post.upvotes);

        Ok(PostPayload {
            post,
            comments: seed_comments()?,
        })
    }
}

/// The two comments every mock post starts with.
pub fn seed_comments() -> Result<Vec<Comment>, AppError> {
    Ok(vec![
        Comment {
            id: 1,
            author: "User1".to_string(),
            content: "Great post!".to_string(),
            created_at: seed_date(2024, 5, 1)?,
        },
        Comment {
            id: 2,
            author: "User2".to_string(),
            content: "Thanks for sharing!".to_string(),
            created_at: seed_date(2024, 5, 2)?,
        },
    ])
}

fn seed_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        AppError::InternalServerError(format!("Invalid seed date {}-{}-{}", year, month, day))
    })
}
