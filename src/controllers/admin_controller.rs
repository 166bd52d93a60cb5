//! Área de administración. Cada operación verifica que el admin del token
//! sigue existiendo y deja una fila de auditoría antes de ejecutar nada.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::car_controller::CarController;
use crate::controllers::parking_controller::ParkingController;
use crate::dto::admin_dto::{ActionResponse, EditCommand};
use crate::dto::car_dto::{AdminCarCommand, CarResponse, LeaveResponse};
use crate::dto::common::{PageParams, PageResponse};
use crate::dto::customer_dto::CustomerResponse;
use crate::dto::parking_dto::{CarsCountResponse, ParkingCommand, ParkingResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::action::{Action, ActionType};
use crate::repositories::action_repository::ActionRepository;
use crate::repositories::admin_repository::AdminRepository;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::parking_repository::ParkingRepository;
use crate::services::edit_service::{CarEdit, CustomerEdit, ParkingEdit};
use crate::utils::errors::{not_found_error, AppError};

pub struct AdminController {
    admins: AdminRepository,
    customers: CustomerRepository,
    cars: CarRepository,
    parkings: ParkingRepository,
    actions: ActionRepository,
    car_ops: CarController,
    parking_ops: ParkingController,
}

impl AdminController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            admins: AdminRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            cars: CarRepository::new(pool.clone()),
            parkings: ParkingRepository::new(pool.clone()),
            actions: ActionRepository::new(pool.clone()),
            car_ops: CarController::new(pool.clone()),
            parking_ops: ParkingController::new(pool),
        }
    }

    /// El middleware ya exige rol admin en el token; aquí se comprueba
    /// además que la cuenta sigue existiendo y se anota la acción.
    async fn verify_admin_and_record(
        &self,
        auth: &AuthenticatedUser,
        action: Action,
    ) -> Result<(), AppError> {
        if !self.admins.username_exists(&auth.username).await? {
            return Err(AppError::Unauthorized("Admin not authorized".to_string()));
        }

        self.actions.record(&action).await?;

        Ok(())
    }

    // ---- Listados paginados ----

    pub async fn list_customers(
        &self,
        auth: &AuthenticatedUser,
        params: &PageParams,
    ) -> Result<PageResponse<CustomerResponse>, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::of(ActionType::RetrievingAllCustomers, &auth.username),
        )
        .await?;

        let customers = self
            .customers
            .find_all_paginated(params.per_page(), params.offset())
            .await?;
        let total = self.customers.count_all().await?;

        Ok(PageResponse::new(
            customers.into_iter().map(CustomerResponse::from).collect(),
            total,
            params,
        ))
    }

    pub async fn list_cars(
        &self,
        auth: &AuthenticatedUser,
        params: &PageParams,
    ) -> Result<PageResponse<CarResponse>, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::of(ActionType::RetrievingAllCars, &auth.username),
        )
        .await?;

        let cars = self
            .cars
            .find_all_paginated(params.per_page(), params.offset())
            .await?;
        let total = self.cars.count_all().await?;

        Ok(PageResponse::new(
            cars.into_iter().map(CarResponse::from).collect(),
            total,
            params,
        ))
    }

    pub async fn list_parkings(
        &self,
        auth: &AuthenticatedUser,
        params: &PageParams,
    ) -> Result<PageResponse<ParkingResponse>, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::of(ActionType::RetrievingAllParkings, &auth.username),
        )
        .await?;

        let parkings = self
            .parkings
            .find_all_paginated(params.per_page(), params.offset())
            .await?;
        let total = self.parkings.count_all().await?;

        Ok(PageResponse::new(
            parkings.into_iter().map(ParkingResponse::from).collect(),
            total,
            params,
        ))
    }

    pub async fn list_actions(
        &self,
        auth: &AuthenticatedUser,
        params: &PageParams,
    ) -> Result<PageResponse<ActionResponse>, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::of(ActionType::RetrievingAllActions, &auth.username),
        )
        .await?;

        let actions = self
            .actions
            .find_all_paginated(params.per_page(), params.offset())
            .await?;
        let total = self.actions.count_all().await?;

        Ok(PageResponse::new(
            actions.into_iter().map(ActionResponse::from).collect(),
            total,
            params,
        ))
    }

    /// Acciones anotadas por el propio admin. No genera fila de auditoría.
    pub async fn my_actions(
        &self,
        auth: &AuthenticatedUser,
    ) -> Result<Vec<ActionResponse>, AppError> {
        if !self.admins.username_exists(&auth.username).await? {
            return Err(AppError::Unauthorized("Admin not authorized".to_string()));
        }

        let actions = self.actions.find_by_creator(&auth.username).await?;

        Ok(actions.into_iter().map(ActionResponse::from).collect())
    }

    // ---- Ediciones de campo ----

    pub async fn update_customer(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        command: EditCommand,
    ) -> Result<CustomerResponse, AppError> {
        command.validate()?;

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &customer_id.to_string()))?;

        let edit = CustomerEdit::parse(&command.field_name, &command.new_value)?;

        self.verify_admin_and_record(
            auth,
            Action::edit(
                &auth.username,
                "customer",
                customer_id,
                edit.field_name(),
                Some(edit.old_value(&customer)),
                &command.new_value,
            ),
        )
        .await?;

        let updated = self
            .customers
            .apply_edit(customer_id, &edit)
            .await?
            .ok_or_else(|| not_found_error("Customer", &customer_id.to_string()))?;

        Ok(updated.into())
    }

    pub async fn update_car(
        &self,
        auth: &AuthenticatedUser,
        car_id: Uuid,
        command: EditCommand,
    ) -> Result<CarResponse, AppError> {
        command.validate()?;

        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", &car_id.to_string()))?;

        let edit = CarEdit::parse(&command.field_name, &command.new_value)?;

        self.verify_admin_and_record(
            auth,
            Action::edit(
                &auth.username,
                "car",
                car_id,
                edit.field_name(),
                Some(edit.old_value(&car)),
                &command.new_value,
            ),
        )
        .await?;

        let updated = self
            .cars
            .apply_edit(car_id, &edit)
            .await?
            .ok_or_else(|| not_found_error("Car", &car_id.to_string()))?;

        Ok(updated.into())
    }

    pub async fn update_parking(
        &self,
        auth: &AuthenticatedUser,
        parking_id: Uuid,
        command: EditCommand,
    ) -> Result<ParkingResponse, AppError> {
        command.validate()?;

        let parking = self
            .parkings
            .find_by_id(parking_id)
            .await?
            .ok_or_else(|| not_found_error("Parking", &parking_id.to_string()))?;

        let edit = ParkingEdit::parse(&command.field_name, &command.new_value)?;

        self.verify_admin_and_record(
            auth,
            Action::edit(
                &auth.username,
                "parking",
                parking_id,
                edit.field_name(),
                Some(edit.old_value(&parking)),
                &command.new_value,
            ),
        )
        .await?;

        let updated = self
            .parkings
            .apply_edit(parking_id, &edit)
            .await?
            .ok_or_else(|| not_found_error("Parking", &parking_id.to_string()))?;

        Ok(updated.into())
    }

    // ---- Gestión de cuentas ----

    pub async fn enable_customer(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
    ) -> Result<CustomerResponse, AppError> {
        self.set_customer_enabled(auth, customer_id, true, ActionType::EnableCustomerAccount)
            .await
    }

    pub async fn disable_customer(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
    ) -> Result<CustomerResponse, AppError> {
        self.set_customer_enabled(auth, customer_id, false, ActionType::DisableCustomerAccount)
            .await
    }

    pub async fn lock_customer(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
    ) -> Result<CustomerResponse, AppError> {
        self.set_customer_locked(auth, customer_id, true, ActionType::LockCustomerAccount)
            .await
    }

    pub async fn unlock_customer(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
    ) -> Result<CustomerResponse, AppError> {
        self.set_customer_locked(auth, customer_id, false, ActionType::UnlockCustomerAccount)
            .await
    }

    async fn set_customer_enabled(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        enabled: bool,
        action_type: ActionType,
    ) -> Result<CustomerResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(action_type, &auth.username, "customer", customer_id),
        )
        .await?;

        let updated = self
            .customers
            .set_enabled(customer_id, enabled)
            .await?
            .ok_or_else(|| not_found_error("Customer", &customer_id.to_string()))?;

        Ok(updated.into())
    }

    async fn set_customer_locked(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        locked: bool,
        action_type: ActionType,
    ) -> Result<CustomerResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(action_type, &auth.username, "customer", customer_id),
        )
        .await?;

        let updated = self
            .customers
            .set_locked(customer_id, locked)
            .await?
            .ok_or_else(|| not_found_error("Customer", &customer_id.to_string()))?;

        Ok(updated.into())
    }

    // ---- Operaciones sobre coches ----

    pub async fn add_car(
        &self,
        auth: &AuthenticatedUser,
        command: AdminCarCommand,
    ) -> Result<CarResponse, AppError> {
        command.validate()?;

        self.verify_admin_and_record(auth, Action::of(ActionType::AddingCar, &auth.username))
            .await?;

        self.car_ops.create(command.customer_id, command.car).await
    }

    pub async fn delete_car(&self, auth: &AuthenticatedUser, car_id: Uuid) -> Result<(), AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(ActionType::DeletingCar, &auth.username, "car", car_id),
        )
        .await?;

        self.car_ops.delete(car_id).await
    }

    pub async fn park_car(
        &self,
        auth: &AuthenticatedUser,
        car_id: Uuid,
        parking_id: Uuid,
    ) -> Result<CarResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(ActionType::ParkingCar, &auth.username, "car", car_id),
        )
        .await?;

        self.car_ops.park(car_id, parking_id).await
    }

    pub async fn leave_parking(
        &self,
        auth: &AuthenticatedUser,
        car_id: Uuid,
    ) -> Result<LeaveResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(ActionType::LeavingParking, &auth.username, "car", car_id),
        )
        .await?;

        self.car_ops.leave(car_id).await
    }

    pub async fn most_expensive_car(
        &self,
        auth: &AuthenticatedUser,
    ) -> Result<CarResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::of(ActionType::RetrievingMostExpensiveCar, &auth.username),
        )
        .await?;

        self.car_ops.most_expensive().await
    }

    // ---- Operaciones sobre parkings ----

    pub async fn add_parking(
        &self,
        auth: &AuthenticatedUser,
        command: ParkingCommand,
    ) -> Result<ParkingResponse, AppError> {
        self.verify_admin_and_record(auth, Action::of(ActionType::AddingParking, &auth.username))
            .await?;

        self.parking_ops.create(command).await
    }

    pub async fn get_parking(
        &self,
        auth: &AuthenticatedUser,
        parking_id: Uuid,
    ) -> Result<ParkingResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(
                ActionType::RetrievingParking,
                &auth.username,
                "parking",
                parking_id,
            ),
        )
        .await?;

        self.parking_ops.get_by_id(parking_id).await
    }

    /// Actualización completa de los datos descriptivos de un parking. Se
    /// audita como edición sin detalle de campo.
    pub async fn update_parking_details(
        &self,
        auth: &AuthenticatedUser,
        parking_id: Uuid,
        command: ParkingCommand,
    ) -> Result<ParkingResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(ActionType::Edit, &auth.username, "parking", parking_id),
        )
        .await?;

        self.parking_ops.update_details(parking_id, command).await
    }

    pub async fn delete_parking(
        &self,
        auth: &AuthenticatedUser,
        parking_id: Uuid,
    ) -> Result<(), AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(
                ActionType::DeletingParking,
                &auth.username,
                "parking",
                parking_id,
            ),
        )
        .await?;

        self.parking_ops.delete(parking_id).await
    }

    pub async fn cars_from_parking(
        &self,
        auth: &AuthenticatedUser,
        parking_id: Uuid,
    ) -> Result<Vec<CarResponse>, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(
                ActionType::RetrievingAllCarsFromParking,
                &auth.username,
                "parking",
                parking_id,
            ),
        )
        .await?;

        self.parking_ops.cars_of(parking_id).await
    }

    pub async fn count_cars_from_parking(
        &self,
        auth: &AuthenticatedUser,
        parking_id: Uuid,
    ) -> Result<CarsCountResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(
                ActionType::RetrievingCarsCountFromParking,
                &auth.username,
                "parking",
                parking_id,
            ),
        )
        .await?;

        self.parking_ops.count_cars(parking_id).await
    }

    pub async fn most_expensive_car_from_parking(
        &self,
        auth: &AuthenticatedUser,
        parking_id: Uuid,
    ) -> Result<CarResponse, AppError> {
        self.verify_admin_and_record(
            auth,
            Action::on_entity(
                ActionType::RetrievingMostExpensiveCarFromParking,
                &auth.username,
                "parking",
                parking_id,
            ),
        )
        .await?;

        self.parking_ops.most_expensive_car(parking_id).await
    }
}
