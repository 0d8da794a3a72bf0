//! Single entry point over the HR subsystems.
//!
//! [`HrService`] owns the registry, the organisation tree, the command
//! history and the configuration. Callers address employees by registry
//! index; the service keeps the organisation tree in step with hires and
//! dismissals.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::info;

use crate::commands::{CommandInvoker, CommandRecord, ManagementCommand};
use crate::config::HrConfig;
use crate::error::HrResult;
use crate::events::RateListener;
use crate::models::{
    ComplianceViolation, Employee, EmployeeBuilder, EmployeeFactory, NewHire, Role,
};
use crate::org::Department;
use crate::payment::{PaymentBreakdown, PaymentChain, PaymentPipeline};
use crate::registry::EmployeeRegistry;
use crate::reports::{AttendanceReport, ComplianceReport, Report};

/// Facade over registry, payment, reports and the organisation tree.
#[derive(Debug)]
pub struct HrService {
    config: HrConfig,
    registry: EmployeeRegistry,
    organization: Department,
    commands: CommandInvoker,
}

impl HrService {
    /// Creates an empty service. The organisation root takes its name from
    /// the configuration.
    pub fn new(config: HrConfig) -> Self {
        let organization = Department::new(config.organization.name.clone());
        Self {
            config,
            registry: EmployeeRegistry::new(),
            organization,
            commands: CommandInvoker::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &EmployeeRegistry {
        &self.registry
    }

    /// Registered employees in index order.
    pub fn employees(&self) -> &[Employee] {
        self.registry.employees()
    }

    /// The organisation root.
    pub fn organization(&self) -> &Department {
        &self.organization
    }

    /// Registers `employee` and places it in the organisation tree.
    ///
    /// With `unit` set, the member goes into the first unit of that name,
    /// which is created under the root if it does not exist yet. Otherwise
    /// the member is attached to the root directly.
    pub fn hire(&mut self, employee: Employee, unit: Option<&str>) -> HrResult<usize> {
        let id = employee.id;
        let index = self.registry.add(employee)?;

        match unit {
            Some(name) => {
                if self.organization.find_unit_mut(name).is_none() {
                    self.organization.add_unit(Department::new(name));
                }
                if let Some(department) = self.organization.find_unit_mut(name) {
                    department.add_member(id);
                }
            }
            None => self.organization.add_member(id),
        }
        Ok(index)
    }

    /// Builds an employee from raw form input and hires it into the unit
    /// named after its department.
    pub fn hire_new(&mut self, hire: NewHire) -> HrResult<usize> {
        let employee = EmployeeFactory::create(hire, &self.config.payment)?;
        let unit = employee.department.clone();
        self.hire(employee, Some(&unit))
    }

    /// Removes the employee at `index` and prunes it from the organisation.
    pub fn dismiss(&mut self, index: usize) -> HrResult<Employee> {
        let employee = self.registry.remove(index)?;
        self.organization.remove_member(employee.id);
        Ok(employee)
    }

    /// Opens an attendance record for the employee at `index`.
    pub fn clock_in(&mut self, index: usize, at: NaiveDateTime) -> HrResult<()> {
        self.registry.attendance_mut(index)?.clock_in(at)
    }

    /// Closes the open attendance record for the employee at `index`.
    pub fn clock_out(&mut self, index: usize, at: NaiveDateTime) -> HrResult<()> {
        self.registry.attendance_mut(index)?.clock_out(at)
    }

    /// Runs the payment pipeline selected for the employee's role.
    pub fn calculate_payment(&self, index: usize) -> HrResult<PaymentBreakdown> {
        let employee = self.registry.employee(index)?;
        let ledger = self.registry.attendance(index)?;

        let pipeline = PaymentPipeline::new(
            PaymentChain::for_role(employee.role),
            self.config.payment.clone(),
        );
        let breakdown = pipeline.calculate_with_trace(ledger, employee.hourly_rate())?;

        info!(
            employee_id = %employee.id,
            strategy = breakdown.strategy.rule_id(),
            gross = %breakdown.gross,
            net = %breakdown.net,
            "Payment calculated"
        );
        Ok(breakdown)
    }

    /// Changes the hourly rate of the employee at `index`, returning the
    /// previous rate. Listeners run after the change is committed.
    pub fn set_hourly_rate(&mut self, index: usize, rate: Decimal) -> HrResult<Decimal> {
        self.registry
            .set_hourly_rate(index, rate, &self.config.payment)
    }

    /// Registers a listener for hourly-rate changes.
    pub fn subscribe_rate_changes(&mut self, listener: RateListener) {
        self.registry.subscribe_rate_changes(listener);
    }

    /// Runs a management command against the employee at `index`.
    pub fn execute(
        &mut self,
        index: usize,
        command: ManagementCommand,
        at: NaiveDateTime,
    ) -> HrResult<String> {
        self.commands.run(&mut self.registry, index, command, at)
    }

    /// Commands executed so far.
    pub fn command_history(&self) -> &[CommandRecord] {
        self.commands.history()
    }

    /// Records a violation for the employee at `index`.
    pub fn add_violation(&mut self, index: usize, violation: ComplianceViolation) -> HrResult<()> {
        self.registry.compliance_mut(index)?.add_violation(violation)
    }

    /// Deletes violation `violation` for the employee at `index`.
    pub fn remove_violation(
        &mut self,
        index: usize,
        violation: usize,
    ) -> HrResult<ComplianceViolation> {
        self.registry
            .compliance_mut(index)?
            .remove_violation(violation)
    }

    /// Renders the attendance report for the employee at `index`.
    pub fn attendance_report(&self, index: usize, generated_at: NaiveDateTime) -> HrResult<String> {
        let employee = self.registry.employee(index)?;
        let ledger = self.registry.attendance(index)?;
        Ok(AttendanceReport::new(employee, ledger).render(generated_at))
    }

    /// Renders the compliance report for the employee at `index`.
    pub fn compliance_report(&self, index: usize, generated_at: NaiveDateTime) -> HrResult<String> {
        let employee = self.registry.employee(index)?;
        let ledger = self.registry.compliance(index)?;
        Ok(ComplianceReport::new(employee, ledger).render(generated_at))
    }

    /// Renders the organisation tree.
    pub fn hierarchy(&self) -> String {
        self.organization.render(&self.registry)
    }

    /// Hires three sample employees into a small hierarchy.
    ///
    /// Returns the index of the first sample hire.
    pub fn seed_demo(&mut self) -> HrResult<usize> {
        let policy = self.config.payment.clone();

        let specialist = EmployeeBuilder::new("Jordan Reyes", 29, "jordan.reyes@example.com")
            .details("Embedded Systems", "Hardware Specialist", demo_hire_date(2023))
            .hourly_rate(Decimal::new(50, 0))
            .build(&policy)?;
        let manager = EmployeeBuilder::new("Casey Morgan", 38, "casey.morgan@example.com")
            .role(Role::Manager)
            .details("Computer Networks", "Manager", demo_hire_date(2024))
            .hourly_rate(Decimal::new(60, 0))
            .team_size(4)
            .build(&policy)?;
        let intern = EmployeeBuilder::new("Avery Brooks", 20, "avery.brooks@example.com")
            .role(Role::Intern)
            .details("Human Resources", "Intern", demo_hire_date(2025))
            .hourly_rate(Decimal::new(20, 0))
            .mentor("Casey Morgan")
            .build(&policy)?;

        let mut engineering = Department::new("Engineering");
        engineering.add_unit(Department::new("Hardware Team"));
        engineering.add_unit(Department::new("Network Team"));
        self.organization.add_unit(engineering);
        self.organization.add_unit(Department::new("Human Resources"));

        let first = self.hire(specialist, Some("Hardware Team"))?;
        self.hire(manager, Some("Network Team"))?;
        self.hire(intern, Some("Human Resources"))?;

        info!(employees = self.registry.len(), "Demo organisation seeded");
        Ok(first)
    }
}

fn demo_hire_date(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HrError;
    use crate::events::RateChange;
    use crate::models::{PerformanceLevel, Severity};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::str::FromStr;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hire_form(type_code: u8, name: &str) -> NewHire {
        NewHire {
            type_code,
            name: name.to_string(),
            age: 30,
            email: format!("{}@example.com", name.to_lowercase()),
            department: "Support".to_string(),
            work_position: "Analyst".to_string(),
            hourly_rate: dec("10"),
            hire_date: None,
        }
    }

    #[test]
    fn test_hire_places_member_in_named_unit() {
        let mut service = HrService::new(HrConfig::default());
        service.hire_new(hire_form(1, "Bruna")).unwrap();
        service.hire_new(hire_form(1, "Caio")).unwrap();

        let rendered = service.hierarchy();
        assert!(rendered.starts_with("+ Company (2)"));
        assert!(rendered.contains("  + Support (2)"));
        assert_eq!(service.organization().components().len(), 1);
    }

    #[test]
    fn test_dismiss_prunes_hierarchy() {
        let mut service = HrService::new(HrConfig::default());
        service.seed_demo().unwrap();
        assert_eq!(service.organization().headcount(), 3);

        let dismissed = service.dismiss(1).unwrap();
        assert_eq!(dismissed.name, "Casey Morgan");
        assert_eq!(service.organization().headcount(), 2);
        assert_eq!(service.employees().len(), 2);
        assert!(!service.hierarchy().contains("Casey Morgan"));
    }

    #[test]
    fn test_payment_for_manager_and_regular() {
        let mut service = HrService::new(HrConfig::default());
        service.hire_new(hire_form(1, "Regular")).unwrap();
        service.hire_new(hire_form(2, "Boss")).unwrap();

        for index in 0..2 {
            service.clock_in(index, at("2026-01-15 09:00:00")).unwrap();
            service.clock_out(index, at("2026-01-15 11:00:00")).unwrap();
        }

        assert_eq!(service.calculate_payment(0).unwrap().net, dec("17"));
        let manager = service.calculate_payment(1).unwrap();
        assert_eq!(manager.gross, dec("20"));
        assert_eq!(manager.net, dec("20.4"));
        assert_eq!(manager.steps.len(), 3);
    }

    #[test]
    fn test_payment_without_records_fails() {
        let mut service = HrService::new(HrConfig::default());
        service.hire_new(hire_form(1, "Idle")).unwrap();
        assert!(matches!(
            service.calculate_payment(0),
            Err(HrError::NoRecords)
        ));
    }

    #[test]
    fn test_rate_change_reaches_listener() {
        let mut service = HrService::new(HrConfig::default());
        service.hire_new(hire_form(1, "Rita")).unwrap();

        let notices = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notices);
        service.subscribe_rate_changes(Box::new(move |change: &RateChange<'_>| {
            sink.borrow_mut().push(change.payroll_notice());
        }));

        let previous = service.set_hourly_rate(0, dec("12.5")).unwrap();
        assert_eq!(previous, dec("10"));
        assert_eq!(
            notices.borrow().as_slice(),
            ["PAYROLL NOTICE: hourly rate for 'Rita' changed from 10.00 to 12.50. Please update payroll records."]
        );

        assert!(service.set_hourly_rate(0, dec("-1")).is_err());
        assert_eq!(notices.borrow().len(), 1);
    }

    #[test]
    fn test_execute_records_history() {
        let mut service = HrService::new(HrConfig::default());
        service.hire_new(hire_form(1, "Gil")).unwrap();

        service
            .execute(
                0,
                ManagementCommand::AddPerformanceEvaluation(PerformanceLevel::Good),
                at("2026-01-15 09:00:00"),
            )
            .unwrap();
        assert_eq!(service.command_history().len(), 1);
        assert_eq!(service.employees()[0].performance(), &[PerformanceLevel::Good]);
    }

    #[test]
    fn test_reports_render_for_index() {
        let mut service = HrService::new(HrConfig::default());
        service.hire_new(hire_form(1, "Lia")).unwrap();
        service
            .add_violation(
                0,
                ComplianceViolation {
                    date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                    description: "Missed safety briefing".to_string(),
                    severity: Severity::Low,
                },
            )
            .unwrap();

        let generated_at = at("2026-01-20 08:00:00");
        let compliance = service.compliance_report(0, generated_at).unwrap();
        assert!(compliance.starts_with("Compliance Report for Lia"));
        assert!(compliance.contains("Missed safety briefing (Severity: Low)"));

        let attendance = service.attendance_report(0, generated_at).unwrap();
        assert!(attendance.contains("No attendance records found."));

        assert!(matches!(
            service.attendance_report(3, generated_at),
            Err(HrError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_seed_demo_builds_hierarchy() {
        let mut service = HrService::new(HrConfig::default());
        assert_eq!(service.seed_demo().unwrap(), 0);

        let rendered = service.hierarchy();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "+ Company (3)");
        assert_eq!(lines[1], "  + Engineering (2)");
        assert_eq!(lines[2], "    + Hardware Team (1)");
        assert_eq!(lines[4], "    + Network Team (1)");
        assert_eq!(lines[6], "  + Human Resources (1)");
    }
}
