use crate::api::{
    bonus::BonusForm,
    catalog::NameForm,
    deduction::DeductionForm,
    employee::EmployeeForm,
    payments::PaymentHistory,
    payroll::{PayForm, PayrollBoard, PayrollForm},
    performance::{EvaluationBoard, EvaluationForm},
    report::PayrollReport,
    users::{AccountForm, NewUserForm},
    vacation::VacationRequestForm,
};
use crate::auth::{handlers::SessionResponse, policy::NavItem};
use crate::confirm::{ConfirmationAnswer, PendingConfirmation};
use crate::model::{
    bonus::Bonus,
    contract_type::ContractType,
    deduction::Deduction,
    employee::Employee,
    payroll::{Payroll, PayrollBonus, PayrollDeduction, PayrollStatus},
    payroll_type::PayrollType,
    performance::PerformanceEvaluation,
    role::Role,
    user::User,
    vacation::{VacationApplication, VacationBalance, VacationStatus},
};
use crate::models::LoginReqDto;
use crate::notify::{Notice, NoticeKind};
use crate::period::{DateRange, PeriodEndPreview};
use crate::session::SESSION_COOKIE;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Portal API",
        version = "1.0.0",
        description = r#"
## Payroll Portal

Backend-for-frontend of the payroll and HR system. It keeps the browser
session, enforces role-based access to each view, validates forms and
forwards requests to the payroll backend with the session's bearer token.

### Features
- **Catalogs**: bonuses, deductions, contract types and payroll types
- **Payroll**: generation with derived period ends, payment, monthly grouping
- **Users and employees**: registration, edits, deactivation
- **Self service**: payment history, vacation requests, evaluations
- **Reports**: payroll report and spreadsheet export

### Security
Protected endpoints need the `portal_session` cookie set by `POST /auth/login`.
Destructive actions answer `202 Accepted` and run only after
`POST /api/confirmations/{id}`.

### Errors
`{ "error": "..." }`; validation failures add a `fields` map and answer `422`.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::current_session,
        crate::auth::handlers::navigation,

        crate::api::notifications::drain,
        crate::api::confirmations::answer,

        crate::api::bonus::list_bonuses,
        crate::api::bonus::create_bonus,
        crate::api::bonus::update_bonus,
        crate::api::bonus::delete_bonus,
        crate::api::deduction::list_deductions,
        crate::api::deduction::create_deduction,
        crate::api::deduction::update_deduction,
        crate::api::deduction::delete_deduction,
        crate::api::contract_type::list_contract_types,
        crate::api::contract_type::create_contract_type,
        crate::api::contract_type::update_contract_type,
        crate::api::contract_type::delete_contract_type,
        crate::api::payroll_type::list_payroll_types,
        crate::api::payroll_type::create_payroll_type,
        crate::api::payroll_type::update_payroll_type,
        crate::api::payroll_type::delete_payroll_type,

        crate::api::payroll::list_payrolls,
        crate::api::payroll::create_payroll,
        crate::api::payroll::pay_payrolls,
        crate::api::payroll::period_end,
        crate::api::payments::list_payments,

        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::deactivate_user,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,

        crate::api::performance::list_evaluations,
        crate::api::performance::create_evaluation,

        crate::api::vacation::list_vacations,
        crate::api::vacation::request_vacation,
        crate::api::vacation::balance,
        crate::api::vacation::accrue,
        crate::api::vacation::approve,
        crate::api::vacation::decline,

        crate::api::report::payroll_report,
        crate::api::report::export
    ),
    components(
        schemas(
            LoginReqDto,
            SessionResponse,
            NavItem,
            Role,
            User,
            Employee,
            AccountForm,
            NewUserForm,
            EmployeeForm,
            Bonus,
            BonusForm,
            Deduction,
            DeductionForm,
            ContractType,
            PayrollType,
            NameForm,
            Payroll,
            PayrollStatus,
            PayrollBonus,
            PayrollDeduction,
            PayrollBoard,
            PayrollForm,
            PayForm,
            PeriodEndPreview,
            PaymentHistory,
            DateRange,
            PerformanceEvaluation,
            EvaluationBoard,
            EvaluationForm,
            VacationApplication,
            VacationStatus,
            VacationBalance,
            VacationRequestForm,
            PayrollReport,
            PendingConfirmation,
            ConfirmationAnswer,
            Notice,
            NoticeKind
        )
    ),
    modifiers(&SessionCookie),
    tags(
        (name = "Auth", description = "Sign-in, session and navigation"),
        (name = "Catalog", description = "Bonuses, deductions, contract and payroll types"),
        (name = "Payroll", description = "Payroll runs and payment history"),
        (name = "Users", description = "Users and employee records"),
        (name = "Vacations", description = "Vacation requests and balances"),
        (name = "Performance", description = "Performance evaluations"),
        (name = "Reports", description = "Payroll reports and export"),
        (name = "Confirmations", description = "Answers to pending destructive actions"),
        (name = "Notifications", description = "Per-session notification feed"),
    )
)]
pub struct ApiDoc;

struct SessionCookie;

impl Modify for SessionCookie {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_view_and_the_cookie_scheme() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/login",
            "/api/payrolls",
            "/api/payments",
            "/api/users/employees",
            "/api/vacations/{id}/decline",
            "/api/reports/export",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }

        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("session_cookie"));
    }
}
