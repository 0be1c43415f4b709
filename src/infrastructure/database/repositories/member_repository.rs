//! SeaORM implementation of MemberRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::member::{Member, MemberRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::member;

pub struct SeaOrmMemberRepository {
    db: DatabaseConnection,
}

impl SeaOrmMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: member::Model) -> Member {
    Member {
        id: m.id,
        name: m.name,
        email: m.email,
        password_hash: m.password_hash,
    }
}

#[async_trait]
impl MemberRepository for SeaOrmMemberRepository {
    async fn save(&self, m: Member) -> DomainResult<Member> {
        debug!("Saving member: {}", m.email);

        let model = member::ActiveModel {
            id: NotSet,
            name: Set(m.name),
            email: Set(m.email),
            password_hash: Set(m.password_hash),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_all(&self) -> DomainResult<Vec<Member>> {
        let models = member::Entity::find()
            .order_by_asc(member::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Member>> {
        let model = member::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Member>> {
        let model = member::Entity::find()
            .filter(member::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
