/*
 * Responsibility
 * - Chirps request/response DTO + list query
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::chirp_repo::{ChirpRow, SortOrder};

pub const MAX_CHIRP_CHARS: usize = 140;

#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

impl CreateChirpRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.body.trim().is_empty() {
            return Err("chirp body is required");
        }
        // Characters, not bytes.
        if self.body.chars().count() > MAX_CHIRP_CHARS {
            return Err("Chirp is too long");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListChirpsQuery {
    pub author_id: Option<Uuid>,
    pub sort: Option<String>,
}

impl ListChirpsQuery {
    pub fn sort_order(&self) -> Result<SortOrder, &'static str> {
        match self.sort.as_deref() {
            None | Some("asc") => Ok(SortOrder::Asc),
            Some("desc") => Ok(SortOrder::Desc),
            Some(_) => Err("sort must be asc or desc"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

impl From<ChirpRow> for ChirpResponse {
    fn from(row: ChirpRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            body: row.body,
            user_id: row.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chirp_length_counts_characters() {
        let ok = CreateChirpRequest {
            body: "é".repeat(MAX_CHIRP_CHARS),
        };
        assert!(ok.validate().is_ok());

        let long = CreateChirpRequest {
            body: "a".repeat(MAX_CHIRP_CHARS + 1),
        };
        assert_eq!(long.validate(), Err("Chirp is too long"));
    }

    #[test]
    fn sort_defaults_to_ascending() {
        assert_eq!(ListChirpsQuery::default().sort_order(), Ok(SortOrder::Asc));

        let q = ListChirpsQuery {
            sort: Some("desc".into()),
            ..Default::default()
        };
        assert_eq!(q.sort_order(), Ok(SortOrder::Desc));

        let q = ListChirpsQuery {
            sort: Some("random".into()),
            ..Default::default()
        };
        assert!(q.sort_order().is_err());
    }
}
