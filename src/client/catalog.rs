use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{ApiError, SessionClient};
use crate::model::bonus::Bonus;
use crate::model::contract_type::ContractType;
use crate::model::deduction::Deduction;
use crate::model::payroll_type::PayrollType;
use crate::models::{Ack, Envelope};

/// A simple admin-maintained lookup table exposed by the backend as a plain
/// CRUD collection.
pub trait CatalogResource: DeserializeOwned + Serialize + Send + 'static {
    /// Backend collection path.
    const PATH: &'static str;
    const DELETE_PROMPT: &'static str;
    const DELETED: &'static str;
}

impl CatalogResource for Bonus {
    const PATH: &'static str = "/bonus";
    const DELETE_PROMPT: &'static str = "¿Estás seguro de eliminar este bono?";
    const DELETED: &'static str = "Bono eliminado exitosamente";
}

impl CatalogResource for Deduction {
    const PATH: &'static str = "/deduction";
    const DELETE_PROMPT: &'static str = "¿Estás seguro de eliminar esta deducción?";
    const DELETED: &'static str = "Deducción eliminada correctamente";
}

impl CatalogResource for ContractType {
    const PATH: &'static str = "/contract_type";
    const DELETE_PROMPT: &'static str = "¿Estás seguro de eliminar este tipo de contrato?";
    const DELETED: &'static str = "Tipo de contrato eliminado exitosamente";
}

impl CatalogResource for PayrollType {
    const PATH: &'static str = "/payroll_type";
    const DELETE_PROMPT: &'static str = "¿Estás seguro de eliminar este tipo de nómina?";
    const DELETED: &'static str = "Tipo de nómina eliminado correctamente";
}

impl SessionClient {
    pub async fn list_catalog<T: CatalogResource>(&self) -> Result<Vec<T>, ApiError> {
        let envelope: Envelope<Vec<T>> = self.get(T::PATH).await?;
        Ok(envelope.data)
    }

    pub async fn create_catalog<T, B>(&self, body: &B) -> Result<T, ApiError>
    where
        T: CatalogResource,
        B: Serialize + ?Sized,
    {
        let envelope: Envelope<T> = self.post(T::PATH, body).await?;
        Ok(envelope.data)
    }

    pub async fn update_catalog<T, B>(&self, id: u64, body: &B) -> Result<T, ApiError>
    where
        T: CatalogResource,
        B: Serialize + ?Sized,
    {
        let envelope: Envelope<T> = self.put(&format!("{}/{}", T::PATH, id), body).await?;
        Ok(envelope.data)
    }

    pub async fn delete_catalog<T: CatalogResource>(&self, id: u64) -> Result<Ack, ApiError> {
        self.delete(&format!("{}/{}", T::PATH, id)).await
    }
}
