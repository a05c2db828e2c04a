use configs::DatabaseConfig;
use models::valve;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the valve schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_and_migrate(&DatabaseConfig::in_memory()).await
}

/// Rows as the store would return them, including characters that need quoting or escaping.
pub fn sample_valves() -> Vec<valve::Model> {
    vec![
        valve::Model { id: 1, nome: "V1".into(), descricao: "desc".into(), tipo: "gate".into(), vazao: 12.5 },
        valve::Model { id: 2, nome: "Válvula, esfera".into(), descricao: "Linha \"A\"".into(), tipo: "ball".into(), vazao: 3.0 },
        valve::Model { id: 3, nome: "R&D <test>".into(), descricao: "controle".into(), tipo: "globe".into(), vazao: 0.25 },
    ]
}
