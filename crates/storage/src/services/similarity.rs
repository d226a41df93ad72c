use std::cmp::Ordering;
use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::submission::{SimilarSubmissionEntry, SimilarityAdvisory};
use crate::error::Result;
use crate::repository::submission::{SubmissionContent, SubmissionRepository};

/// Matches at or above this cosine similarity are surfaced to the reviewer.
pub const DUPLICATE_THRESHOLD: f64 = 0.8;

/// Duplicate-content advisory for one submission under review.
///
/// Compares the submission's free text against every earlier submission
/// with content and surfaces matches at or above the threshold. Advisory
/// only: it never blocks approval, it just pre-fills a suggested rejection
/// reason from the closest match.
pub async fn find_similar(pool: &PgPool, submission_id: Uuid) -> Result<SimilarityAdvisory> {
    let repo = SubmissionRepository::new(pool);
    let submission = repo.find_by_id(submission_id).await?;

    let Some(content) = submission.content.filter(|c| !c.trim().is_empty()) else {
        return Ok(SimilarityAdvisory {
            matches: Vec::new(),
            suggested_reason: None,
        });
    };

    let prior: Vec<SubmissionContent> = repo
        .list_other_content(submission_id)
        .await?
        .into_iter()
        .filter(|p| p.created_at <= submission.created_at)
        .collect();

    Ok(build_advisory(&content, &prior, DUPLICATE_THRESHOLD))
}

/// Score `content` against prior submissions and keep matches at or above
/// `threshold`, closest first.
pub fn build_advisory(
    content: &str,
    prior: &[SubmissionContent],
    threshold: f64,
) -> SimilarityAdvisory {
    let mut matches: Vec<SimilarSubmissionEntry> = prior
        .iter()
        .filter_map(|p| {
            let similarity = cosine_similarity(content, &p.content);
            if similarity < threshold {
                return None;
            }
            Some(SimilarSubmissionEntry {
                submission_id: p.submission_id,
                user_id: p.user_id,
                similarity,
                similarity_percent: (similarity * 100.0).round() as i32,
                status: p.status,
                created_at: p.created_at,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then(a.created_at.cmp(&b.created_at))
    });

    let suggested_reason = matches.first().map(|top| {
        format!(
            "Duplicate content: {}% similar to a submission from {}",
            top.similarity_percent,
            top.created_at.format("%Y-%m-%d")
        )
    });

    SimilarityAdvisory {
        matches,
        suggested_reason,
    }
}

/// Cosine similarity between the term-frequency vectors of two texts,
/// on 0..=1. Empty or non-overlapping texts score 0.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let tf_a = term_frequencies(a);
    let tf_b = term_frequencies(b);

    if tf_a.is_empty() || tf_b.is_empty() {
        return 0.0;
    }

    let dot: f64 = tf_a
        .iter()
        .filter_map(|(term, freq_a)| tf_b.get(term).map(|freq_b| freq_a * freq_b))
        .sum();

    let norm_a: f64 = tf_a.values().map(|f| f * f).sum::<f64>().sqrt();
    let norm_b: f64 = tf_b.values().map(|f| f * f).sum::<f64>().sqrt();

    dot / (norm_a * norm_b)
}

fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut frequencies = HashMap::new();

    for term in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        *frequencies.entry(term.to_lowercase()).or_insert(0.0) += 1.0;
    }

    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn earlier(content: &str, created_at: DateTime<Utc>) -> SubmissionContent {
        SubmissionContent {
            submission_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            content: content.to_string(),
            status: SubmissionStatus::Approved,
            created_at,
        }
    }

    #[test]
    fn identical_texts_score_one() {
        let score = cosine_similarity("Attended the spring hackathon", "attended the Spring hackathon");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_texts_score_zero() {
        assert_eq!(cosine_similarity("alpha beta gamma", "delta epsilon zeta"), 0.0);
        assert_eq!(cosine_similarity("", "anything"), 0.0);
    }

    #[test]
    fn partial_overlap_scores_between() {
        // 3 of 4 distinct terms shared: 3 / (2 * 2) = 0.75
        let score = cosine_similarity("alpha beta gamma delta", "alpha beta gamma epsilon");
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn advisory_surfaces_near_duplicates_with_percent_and_date() {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        // 7 of 8 distinct terms shared: 7 / 8 = 0.875
        let prior = vec![
            earlier("one two three four five six seven eight", date),
            earlier("completely unrelated text about gardening", date),
        ];

        let advisory = build_advisory(
            "one two three four five six seven nine",
            &prior,
            DUPLICATE_THRESHOLD,
        );

        assert_eq!(advisory.matches.len(), 1);
        assert_eq!(advisory.matches[0].similarity_percent, 88);
        let reason = advisory.suggested_reason.unwrap();
        assert!(reason.contains("88%"));
        assert!(reason.contains("2024-02-10"));
    }

    #[test]
    fn below_threshold_produces_no_advisory() {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let prior = vec![earlier("alpha beta gamma delta", date)];

        let advisory = build_advisory("alpha beta gamma epsilon", &prior, DUPLICATE_THRESHOLD);

        assert!(advisory.matches.is_empty());
        assert!(advisory.suggested_reason.is_none());
    }

    #[test]
    fn closest_match_sorts_first() {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let near = earlier("one two three four five six seven eight", date);
        let exact = earlier("one two three four five six seven nine", date);
        let prior = vec![near.clone(), exact.clone()];

        let advisory = build_advisory(
            "one two three four five six seven nine",
            &prior,
            DUPLICATE_THRESHOLD,
        );

        assert_eq!(advisory.matches.len(), 2);
        assert_eq!(advisory.matches[0].submission_id, exact.submission_id);
        assert_eq!(advisory.matches[1].submission_id, near.submission_id);
    }
}
