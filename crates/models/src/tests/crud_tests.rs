use crate::db::connect_and_migrate;
use crate::errors::ModelError;
use crate::valve;
use anyhow::Result;
use configs::DatabaseConfig;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};

async fn setup_test_db() -> Result<DatabaseConnection> {
    connect_and_migrate(&DatabaseConfig::in_memory()).await
}

fn new_valve(nome: &str) -> valve::ActiveModel {
    valve::ActiveModel {
        nome: Set(nome.to_string()),
        descricao: Set("desc".to_string()),
        tipo: Set("gate".to_string()),
        vazao: Set(12.5),
        ..Default::default()
    }
}

/// Insert, read back, and look up by name
#[tokio::test]
async fn test_valve_insert_and_find() -> Result<()> {
    let db = setup_test_db().await?;

    let created = new_valve("V1").insert(&db).await?;
    assert_eq!(created.id, 1);
    assert_eq!(created.nome, "V1");
    assert_eq!(created.vazao, 12.5);

    let by_id = valve::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(by_id, Some(created.clone()));

    let by_name = valve::Entity::find()
        .filter(valve::Column::Nome.eq("V1"))
        .one(&db)
        .await?;
    assert_eq!(by_name.map(|v| v.id), Some(created.id));
    Ok(())
}

/// The schema itself rejects a second valve with the same name
#[tokio::test]
async fn test_unique_nome_constraint() -> Result<()> {
    let db = setup_test_db().await?;
    new_valve("V1").insert(&db).await?;

    let err = new_valve("V1").insert(&db).await.expect_err("duplicate must fail");
    assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));

    let all = valve::Entity::find().all(&db).await?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[test]
fn test_validation_rules() {
    assert!(valve::validate("V1", "desc", "gate", 1.0).is_ok());
    assert!(matches!(valve::validate("  ", "desc", "gate", 1.0), Err(ModelError::Validation(_))));
    assert!(matches!(valve::validate("V1", "", "gate", 1.0), Err(ModelError::Validation(_))));
    assert!(matches!(valve::validate("V1", "desc", "", 1.0), Err(ModelError::Validation(_))));
    assert!(matches!(valve::validate("V1", "desc", "gate", f64::NAN), Err(ModelError::Validation(_))));
    let long = "x".repeat(valve::NOME_MAX_LEN + 1);
    assert!(valve::validate_nome(&long).is_err());
}
