//! Directorio de vehículos
//!
//! `VehicleDirectory` es el contrato que consumen los servicios. La
//! unicidad de placa y chasis la garantiza el almacén en `create`: en
//! PostgreSQL con las restricciones UNIQUE, en memoria comprobando e
//! insertando bajo el mismo candado de escritura.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::FixedOffset;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::models::{NewVehicle, Vehicle};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::local_now;

const PLATE_CONSTRAINT: &str = "vehicles_plate_key";
const CHASSIS_CONSTRAINT: &str = "vehicles_chassis_key";

const SELECT_COLUMNS: &str =
    "id, plate, color, model, chassis, brand, year, type, created_at, updated_at";

#[async_trait]
pub trait VehicleDirectory: Send + Sync {
    /// Buscar por placa ya normalizada (mayúsculas)
    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>>;

    /// Buscar por chasis ya normalizado (mayúsculas)
    async fn find_by_chassis(&self, chassis: &str) -> AppResult<Option<Vehicle>>;

    /// Persistir un borrador asignando id y marcas de tiempo.
    ///
    /// Falla con `DuplicatePlate` o `DuplicateChassis` si viola la unicidad;
    /// en ese caso no se crea ningún registro.
    async fn create(&self, draft: NewVehicle) -> AppResult<Vehicle>;

    /// Todos los vehículos ordenados por id
    async fn list_all(&self) -> AppResult<Vec<Vehicle>>;
}

// ─── PostgreSQL ──────────────────────────────────────────────────────────────

pub struct PgVehicleRepository {
    pool: PgPool,
    offset: FixedOffset,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool, offset: FixedOffset) -> Self {
        Self { pool, offset }
    }

    async fn find_by_column(&self, column: &str, value: &str) -> AppResult<Option<Vehicle>> {
        let query = format!("SELECT {} FROM vehicles WHERE {} = $1", SELECT_COLUMNS, column);
        let vehicle = sqlx::query_as::<_, Vehicle>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }
}

#[async_trait]
impl VehicleDirectory for PgVehicleRepository {
    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>> {
        self.find_by_column("plate", plate).await
    }

    async fn find_by_chassis(&self, chassis: &str) -> AppResult<Option<Vehicle>> {
        self.find_by_column("chassis", chassis).await
    }

    async fn create(&self, draft: NewVehicle) -> AppResult<Vehicle> {
        let now = local_now(self.offset);
        let query = format!(
            r#"
            INSERT INTO vehicles (plate, color, model, chassis, brand, year, type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        );

        sqlx::query_as::<_, Vehicle>(&query)
            .bind(&draft.plate)
            .bind(&draft.color)
            .bind(&draft.model)
            .bind(&draft.chassis)
            .bind(&draft.brand)
            .bind(draft.year)
            .bind(&draft.vehicle_type)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, &draft))
    }

    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let query = format!("SELECT {} FROM vehicles ORDER BY id", SELECT_COLUMNS);
        let vehicles = sqlx::query_as::<_, Vehicle>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }
}

/// Traducir una violación de UNIQUE al error de negocio correspondiente
fn map_insert_error(err: sqlx::Error, draft: &NewVehicle) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(CHASSIS_CONSTRAINT) => AppError::DuplicateChassis(draft.chassis.clone()),
                Some(PLATE_CONSTRAINT) | None => AppError::DuplicatePlate(draft.plate.clone()),
                Some(other) => AppError::Internal(format!("unique constraint {} violated", other)),
            };
        }
    }
    AppError::Database(err)
}

// ─── En memoria ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct Inner {
    next_id: i64,
    vehicles: Vec<Vehicle>,
}

/// Directorio en memoria para desarrollo y pruebas
#[derive(Clone)]
pub struct InMemoryVehicleRepository {
    inner: Arc<RwLock<Inner>>,
    offset: FixedOffset,
}

impl InMemoryVehicleRepository {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            offset,
        }
    }
}

#[async_trait]
impl VehicleDirectory for InMemoryVehicleRepository {
    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>> {
        let inner = self.inner.read().await;
        Ok(inner.vehicles.iter().find(|v| v.plate == plate).cloned())
    }

    async fn find_by_chassis(&self, chassis: &str) -> AppResult<Option<Vehicle>> {
        let inner = self.inner.read().await;
        Ok(inner.vehicles.iter().find(|v| v.chassis == chassis).cloned())
    }

    async fn create(&self, draft: NewVehicle) -> AppResult<Vehicle> {
        let mut inner = self.inner.write().await;

        if inner.vehicles.iter().any(|v| v.plate == draft.plate) {
            return Err(AppError::DuplicatePlate(draft.plate));
        }
        if inner.vehicles.iter().any(|v| v.chassis == draft.chassis) {
            return Err(AppError::DuplicateChassis(draft.chassis));
        }

        inner.next_id += 1;
        let vehicle = draft.into_vehicle(inner.next_id, local_now(self.offset));
        inner.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn list_all(&self) -> AppResult<Vec<Vehicle>> {
        let inner = self.inner.read().await;
        Ok(inner.vehicles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};

    fn repo() -> InMemoryVehicleRepository {
        InMemoryVehicleRepository::new(FixedOffset::west_opt(5 * 3600).unwrap())
    }

    fn draft(plate: &str, chassis: &str) -> NewVehicle {
        NewVehicle {
            plate: plate.to_string(),
            color: "ROJO".to_string(),
            model: "SEDAN".to_string(),
            chassis: chassis.to_string(),
            brand: None,
            year: Some(2020),
            vehicle_type: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_timestamps() {
        let repo = repo();
        let first = repo.create(draft("ABC123", "CH1")).await.unwrap();
        let second = repo.create(draft("ABC124", "CH2")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn duplicate_plate_leaves_directory_unchanged() {
        let repo = repo();
        repo.create(draft("ABC123", "CH1")).await.unwrap();

        let err = repo.create(draft("ABC123", "CH2")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicatePlate(ref p) if p == "ABC123"));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
        assert!(repo.find_by_chassis("CH2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_chassis_is_rejected() {
        let repo = repo();
        repo.create(draft("ABC123", "CH1")).await.unwrap();

        let err = repo.create(draft("XYZ987", "CH1")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateChassis(_)));
        assert!(repo.find_by_plate("XYZ987").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_registrations_of_one_plate_create_one_record() {
        let repo = repo();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(draft("PBX1234", &format!("CH{}", i))).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lookups_and_listing() {
        let repo = repo();
        repo.create(draft("ABC123", "CH1")).await.unwrap();
        repo.create(draft("ABC124", "CH2")).await.unwrap();

        let found = repo.find_by_plate("ABC124").await.unwrap().unwrap();
        assert_eq!(found.chassis, "CH2");
        assert!(repo.find_by_plate("ZZZ000").await.unwrap().is_none());

        let plates: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.plate)
            .collect();
        assert_eq!(plates, vec!["ABC123", "ABC124"]);
    }

    // Error de PostgreSQL mínimo para ejercitar map_insert_error sin base de datos
    #[derive(Debug)]
    struct PgConstraintError {
        unique: bool,
        constraint: Option<&'static str>,
    }

    impl std::fmt::Display for PgConstraintError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "constraint violated: {:?}", self.constraint)
        }
    }

    impl std::error::Error for PgConstraintError {}

    impl DatabaseError for PgConstraintError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::NotNullViolation
            }
        }
    }

    fn db_error(unique: bool, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgConstraintError { unique, constraint }))
    }

    #[test]
    fn unique_violations_map_to_duplicate_errors() {
        let draft = draft("PBX1234", "CH9");

        let err = map_insert_error(
            db_error(true, Some("vehicles_chassis_key")),
            &draft,
        );
        assert!(matches!(err, AppError::DuplicateChassis(ref c) if c == "CH9"));

        let err = map_insert_error(
            db_error(true, Some("vehicles_plate_key")),
            &draft,
        );
        assert!(matches!(err, AppError::DuplicatePlate(ref p) if p == "PBX1234"));

        let err = map_insert_error(db_error(true, None), &draft);
        assert!(matches!(err, AppError::DuplicatePlate(_)));

        let err = map_insert_error(
            db_error(true, Some("vehicles_other_key")),
            &draft,
        );
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn other_database_errors_stay_internal() {
        let draft = draft("PBX1234", "CH9");

        let err = map_insert_error(db_error(false, None), &draft);
        assert!(matches!(err, AppError::Database(_)));

        let err = map_insert_error(sqlx::Error::RowNotFound, &draft);
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.public_message(), "Error interno del servidor");
    }
}
