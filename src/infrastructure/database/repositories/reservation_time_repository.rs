//! SeaORM implementation of ReservationTimeRepository

use async_trait::async_trait;
use chrono::NaiveTime;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::reservation_time::{ReservationTime, ReservationTimeRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::reservation_time;

pub struct SeaOrmReservationTimeRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationTimeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: reservation_time::Model) -> ReservationTime {
    ReservationTime {
        id: m.id,
        start_at: m.start_at,
    }
}

#[async_trait]
impl ReservationTimeRepository for SeaOrmReservationTimeRepository {
    async fn save(&self, time: ReservationTime) -> DomainResult<ReservationTime> {
        debug!("Saving reservation time: {}", time.start_at);

        let model = reservation_time::ActiveModel {
            id: NotSet,
            start_at: Set(time.start_at),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_all(&self) -> DomainResult<Vec<ReservationTime>> {
        let models = reservation_time::Entity::find()
            .order_by_asc(reservation_time::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ReservationTime>> {
        let model = reservation_time::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        let count = reservation_time::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn exists_by_start_at(&self, start_at: NaiveTime) -> DomainResult<bool> {
        let count = reservation_time::Entity::find()
            .filter(reservation_time::Column::StartAt.eq(start_at))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting reservation time: {}", id);
        reservation_time::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
