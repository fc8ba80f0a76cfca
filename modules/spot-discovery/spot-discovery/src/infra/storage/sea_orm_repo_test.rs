#[cfg(test)]
mod tests {
    use super::super::*;
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;
    use spot_discovery_sdk::models::Rating;
    use uuid::Uuid;

    use crate::domain::repo::{NewReview, ReviewsRepository};
    use sea_orm_repo::SeaOrmReviewsRepository;

    async fn connect() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        migrations::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn new_review(user: &str, text: &str, rating: Rating) -> NewReview {
        NewReview {
            user_id: user.to_owned(),
            user_name: user.to_uppercase(),
            user_photo_url: None,
            text: text.to_owned(),
            rating,
        }
    }

    #[tokio::test]
    async fn test_second_vote_by_same_user_is_refused() {
        let repo = SeaOrmReviewsRepository::new(connect().await);

        let first = repo
            .try_insert_vote("s1", new_review("u1", "", Rating::Up))
            .await
            .unwrap();
        let second = repo
            .try_insert_vote("s1", new_review("u1", "", Rating::Down))
            .await
            .unwrap();
        let other_spot = repo
            .try_insert_vote("s2", new_review("u1", "", Rating::Down))
            .await
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(other_spot.is_some());
        let rows = repo.list("s1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rating, Rating::Up);
    }

    #[tokio::test]
    async fn test_comments_are_not_constrained() {
        let repo = SeaOrmReviewsRepository::new(connect().await);

        repo.try_insert_vote("s1", new_review("u1", "", Rating::Up))
            .await
            .unwrap();
        repo.insert_comment("s1", new_review("u1", "one", Rating::None))
            .await
            .unwrap();
        repo.insert_comment("s1", new_review("u1", "two", Rating::None))
            .await
            .unwrap();

        assert_eq!(repo.list("s1").await.unwrap().len(), 3);
        assert!(repo.list("s2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_are_scoped_to_spot() {
        let repo = SeaOrmReviewsRepository::new(connect().await);
        let comment = repo
            .insert_comment("s1", new_review("u1", "before", Rating::None))
            .await
            .unwrap();

        assert!(repo.update_text("s2", comment.id, "x").await.unwrap().is_none());
        let updated = repo
            .update_text("s1", comment.id, "after")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "after");
        assert_eq!(updated.user_name, "U1");

        assert!(!repo.delete("s2", comment.id).await.unwrap());
        assert!(repo.delete("s1", comment.id).await.unwrap());
        assert!(repo.find("s1", comment.id).await.unwrap().is_none());
        assert!(!repo.delete("s1", Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_vote_can_be_recast_after_delete() {
        let repo = SeaOrmReviewsRepository::new(connect().await);
        let vote = repo
            .try_insert_vote("s1", new_review("u1", "", Rating::Up))
            .await
            .unwrap()
            .unwrap();

        assert!(repo.delete("s1", vote.id).await.unwrap());

        let recast = repo
            .try_insert_vote("s1", new_review("u1", "", Rating::Down))
            .await
            .unwrap();
        assert_eq!(recast.map(|r| r.rating), Some(Rating::Down));
    }
}
