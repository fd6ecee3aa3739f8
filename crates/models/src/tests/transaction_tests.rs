use super::setup_test_db;
use crate::todo;
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, PaginatorTrait, TransactionTrait};

fn sample(title: &str) -> todo::NewTodo {
    todo::NewTodo { title: title.into(), description: None, completed: false, created_at: Utc::now().into() }
}

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let created = sample("committed").into_active_model().insert(&txn).await?;
    txn.commit().await?;

    let found = todo::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.map(|t| t.title), Some("committed".to_string()));
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    sample("rolled back").into_active_model().insert(&txn).await?;
    txn.rollback().await?;

    assert_eq!(todo::Entity::find().count(&db).await?, 0);
    Ok(())
}
