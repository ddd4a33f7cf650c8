use serde::Serialize;

use crate::client::{ApiError, SessionClient};
use crate::model::employee::Employee;
use crate::model::user::User;
use crate::models::{Ack, Envelope};

impl SessionClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let envelope: Envelope<Vec<User>> = self.get("/users").await?;
        Ok(envelope.data)
    }

    /// Registers a user; employee-role bodies also carry the employee record.
    pub async fn register_user<B: Serialize + ?Sized>(&self, body: &B) -> Result<User, ApiError> {
        let envelope: Envelope<User> = self.post("/register", body).await?;
        Ok(envelope.data)
    }

    pub async fn update_user<B: Serialize + ?Sized>(
        &self,
        user_id: u64,
        body: &B,
    ) -> Result<User, ApiError> {
        let envelope: Envelope<User> = self.put(&format!("/user/{}", user_id), body).await?;
        Ok(envelope.data)
    }

    pub async fn deactivate_user(&self, user_id: u64) -> Result<Ack, ApiError> {
        self.put_empty(&format!("/user/low/{}", user_id)).await
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let envelope: Envelope<Vec<Employee>> = self.get("/employee").await?;
        Ok(envelope.data)
    }

    pub async fn get_employee(&self, employee_id: u64) -> Result<Employee, ApiError> {
        let envelope: Envelope<Employee> = self.get(&format!("/employee/{}", employee_id)).await?;
        Ok(envelope.data)
    }

    pub async fn update_employee<B: Serialize + ?Sized>(
        &self,
        employee_id: u64,
        body: &B,
    ) -> Result<Employee, ApiError> {
        let envelope: Envelope<Employee> = self
            .put(&format!("/employee/{}", employee_id), body)
            .await?;
        Ok(envelope.data)
    }
}
