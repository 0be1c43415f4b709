//! SeaORM implementation of ThemeRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::db_err;
use crate::domain::theme::{Theme, ThemeRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{reservation, theme};

pub struct SeaOrmThemeRepository {
    db: DatabaseConnection,
}

impl SeaOrmThemeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: theme::Model) -> Theme {
    Theme {
        id: m.id,
        name: m.name,
        description: m.description,
        thumbnail: m.thumbnail,
    }
}

#[async_trait]
impl ThemeRepository for SeaOrmThemeRepository {
    async fn save(&self, t: Theme) -> DomainResult<Theme> {
        debug!("Saving theme: {}", t.name);

        let model = theme::ActiveModel {
            id: NotSet,
            name: Set(t.name),
            description: Set(t.description),
            thumbnail: Set(t.thumbnail),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_all(&self) -> DomainResult<Vec<Theme>> {
        let models = theme::Entity::find()
            .order_by_asc(theme::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Theme>> {
        let model = theme::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        let count = theme::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_popular(&self, limit: u64) -> DomainResult<Vec<Theme>> {
        let models = theme::Entity::find()
            .join(JoinType::LeftJoin, theme::Relation::Reservation.def())
            .group_by(theme::Column::Id)
            .order_by_desc(Expr::col((reservation::Entity, reservation::Column::Id)).count())
            .order_by_asc(theme::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting theme: {}", id);
        theme::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::domain::reservation::{Reservation, ReservationRepository};
    use crate::domain::reservation_time::{ReservationTime, ReservationTimeRepository};
    use crate::infrastructure::database::repositories::reservation_repository::SeaOrmReservationRepository;
    use crate::infrastructure::database::repositories::reservation_time_repository::SeaOrmReservationTimeRepository;
    use crate::infrastructure::database::repositories::test_support::migrated_db;

    fn theme(name: &str) -> Theme {
        Theme::new(name, format!("{} description", name), format!("https://img/{}.png", name))
    }

    #[tokio::test]
    async fn save_then_find_by_id_roundtrips() {
        let repo = SeaOrmThemeRepository::new(migrated_db().await);

        let saved = repo.save(theme("mark")).await.unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(saved));
        assert_eq!(repo.find_by_id(20).await.unwrap(), None);
    }

    #[tokio::test]
    async fn exists_by_id_reflects_storage() {
        let repo = SeaOrmThemeRepository::new(migrated_db().await);
        repo.save(theme("mark")).await.unwrap();

        assert!(repo.exists_by_id(1).await.unwrap());
        assert!(!repo.exists_by_id(12).await.unwrap());
    }

    #[tokio::test]
    async fn find_popular_orders_by_reservation_count() {
        let db = migrated_db().await;
        let themes = SeaOrmThemeRepository::new(db.clone());
        let times = SeaOrmReservationTimeRepository::new(db.clone());
        let reservations = SeaOrmReservationRepository::new(db);

        let quiet = themes.save(theme("quiet")).await.unwrap();
        let busy = themes.save(theme("busy")).await.unwrap();
        let medium = themes.save(theme("medium")).await.unwrap();
        let slot = times
            .save(ReservationTime::new(NaiveTime::from_hms_opt(10, 0, 0).unwrap()))
            .await
            .unwrap();

        let day = |d: u32| NaiveDate::from_ymd_opt(2024, 4, d).unwrap();
        for d in 1..=3 {
            reservations
                .save(Reservation::new("guest", day(d), slot.clone(), busy.clone()))
                .await
                .unwrap();
        }
        reservations
            .save(Reservation::new("guest", day(1), slot.clone(), medium.clone()))
            .await
            .unwrap();

        let popular = themes.find_popular(10).await.unwrap();
        assert_eq!(popular, vec![busy, medium, quiet]);
    }

    #[tokio::test]
    async fn find_popular_respects_limit_and_breaks_ties_by_id() {
        let repo = SeaOrmThemeRepository::new(migrated_db().await);
        for i in 0..12 {
            repo.save(theme(&format!("theme-{}", i))).await.unwrap();
        }

        let popular = repo.find_popular(10).await.unwrap();
        assert_eq!(popular.len(), 10);
        let ids: Vec<i32> = popular.iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn delete_by_id_removes_row() {
        let repo = SeaOrmThemeRepository::new(migrated_db().await);
        let saved = repo.save(theme("mark")).await.unwrap();

        repo.delete_by_id(saved.id).await.unwrap();
        assert_eq!(repo.find_by_id(saved.id).await.unwrap(), None);
    }
}
