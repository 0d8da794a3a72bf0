//! Menu loop.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::commands::ManagementCommand;
use crate::events::RateChange;
use crate::models::{
    ComplianceViolation, LeaveRequest, NewHire, PerformanceLevel, Severity, TrainingSession,
};
use crate::service::HrService;

use super::{CliError, Prompter};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

const MAIN_MENU: &str = "\
============== Human Resources Management System ==============
(1) Employees Data
(2) Management
(3) Attendance
(4) Payment
(5) Reports
(6) Compliance
(7) Show Company Hierarchy
(8) Change Hourly Rate
(0) Exit";

const EMPLOYEES_MENU: &str = "(1) List employees\n(2) Add a new employee\n(3) Remove an employee";

const MANAGEMENT_MENU: &str = "\
(1) Add Training
(2) Remove Training
(3) Add Performance Evaluation
(4) Remove Performance Evaluation
(5) Add Leave Request
(6) Remove Leave Request
(7) Add Benefit
(8) Remove Benefit
(9) Show Data";

const ATTENDANCE_MENU: &str = "(1) Clock In\n(2) Clock Out\n(3) Show Records";

const REPORTS_MENU: &str = "(1) Attendance Report\n(2) Compliance Report";

const COMPLIANCE_MENU: &str = "(1) Add Violation\n(2) Remove Violation\n(3) Show Violations";

enum Flow {
    Continue,
    Exit,
}

/// An interactive session over an [`HrService`].
///
/// Rejected operations and malformed input are reported and the menu is
/// shown again. The session ends on the exit option or when input runs out.
pub struct Session<P, W> {
    service: HrService,
    prompter: P,
    out: W,
    notices: Rc<RefCell<Vec<String>>>,
    clock: fn() -> NaiveDateTime,
}

impl<P: Prompter, W: Write> Session<P, W> {
    /// Creates a session and subscribes it to rate-change notices.
    pub fn new(mut service: HrService, prompter: P, out: W) -> Self {
        let notices = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notices);
        service.subscribe_rate_changes(Box::new(move |change: &RateChange<'_>| {
            sink.borrow_mut().push(change.payroll_notice());
        }));

        Self {
            service,
            prompter,
            out,
            notices,
            clock: || Local::now().naive_local(),
        }
    }

    /// Replaces the clock used for attendance and report timestamps.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying service.
    pub fn service(&self) -> &HrService {
        &self.service
    }

    /// Consumes the session, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the menu loop until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), CliError> {
        writeln!(
            self.out,
            "Organization: {}",
            self.service.config().organization.name
        )?;
        loop {
            writeln!(self.out, "\n{}", MAIN_MENU)?;
            let choice = match self.prompter.read_line("Enter your choice: ")? {
                Some(line) => line,
                None => break,
            };

            let outcome = self.dispatch(choice.trim());
            self.flush_notices()?;

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    writeln!(self.out, "Exiting system. Goodbye!")?;
                    return Ok(());
                }
                Err(CliError::EndOfInput) => break,
                Err(err) if err.is_recoverable() => {
                    debug!(error = %err, "Menu action rejected");
                    writeln!(self.out, "Error: {}", err)?;
                }
                Err(err) => return Err(err),
            }
        }
        writeln!(self.out, "Input closed. Goodbye!")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow, CliError> {
        match choice {
            "1" => self.employees_menu()?,
            "2" => self.management_menu()?,
            "3" => self.attendance_menu()?,
            "4" => self.payment()?,
            "5" => self.reports_menu()?,
            "6" => self.compliance_menu()?,
            "7" => {
                writeln!(self.out, "\n--- Company Organizational Hierarchy ---")?;
                writeln!(self.out, "{}", self.service.hierarchy())?;
            }
            "8" => self.change_rate()?,
            "0" => return Ok(Flow::Exit),
            _ => writeln!(self.out, "Invalid option, please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn employees_menu(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "\n{}", EMPLOYEES_MENU)?;
        match self.ask("Choose action: ")?.as_str() {
            "1" => {
                writeln!(self.out, "\n--- All Employees ---")?;
                if self.service.employees().is_empty() {
                    writeln!(self.out, "No employees registered.")?;
                }
                for employee in self.service.employees() {
                    writeln!(self.out, "{}\n", employee.describe())?;
                }
            }
            "2" => {
                writeln!(self.out, "\nPlease provide new employee details:")?;
                let name = self.ask("Name: ")?;
                let age = self.ask_parsed::<u32>("Age: ", "a whole number")?;
                let email = self.ask("Email: ")?;
                let department = self.ask("Department: ")?;
                let work_position = self.ask("Work Position: ")?;
                let hourly_rate = self.ask_parsed::<Decimal>("Salary per hour: ", "a decimal amount")?;
                let hire_date = self.ask_optional_date("Hire Date (YYYY-MM-DD, blank if unknown): ")?;
                let type_code = self.ask_parsed::<u8>(
                    "Employee Type (1: Regular, 2: Manager, 3: Intern): ",
                    "1, 2 or 3",
                )?;

                let index = self.service.hire_new(NewHire {
                    type_code,
                    name,
                    age,
                    email,
                    department,
                    work_position,
                    hourly_rate,
                    hire_date,
                })?;
                let hired = &self.service.employees()[index];
                writeln!(self.out, "Employee {} hired as {}.", hired.name, hired.role)?;
            }
            "3" => {
                let index = self.choose_employee("Enter the number of the employee to remove: ")?;
                let removed = self.service.dismiss(index)?;
                writeln!(self.out, "Employee {} removed.", removed.name)?;
            }
            _ => writeln!(self.out, "Invalid option.")?,
        }
        Ok(())
    }

    fn management_menu(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "\n--- Management ---")?;
        let index = self.choose_employee("Choose employee to manage: ")?;
        let name = self.service.registry().employee(index)?.name.clone();

        writeln!(self.out, "\nManaging {}:\n{}", name, MANAGEMENT_MENU)?;
        let command = match self.ask("Choose action: ")?.as_str() {
            "1" => {
                let date = self.ask_date("Training Date (YYYY-MM-DD): ")?;
                let time = self.ask_time("Time (HH:MM): ")?;
                let description = self.ask("Description: ")?;
                ManagementCommand::AddTraining(TrainingSession {
                    date,
                    time,
                    description,
                })
            }
            "2" => ManagementCommand::RemoveTraining(self.ask_position("Training number: ")?),
            "3" => {
                writeln!(self.out, "Performance Level (1: Good, 2: Average, 3: Bad)")?;
                let code = self.ask_parsed::<u8>("Choose level: ", "1, 2 or 3")?;
                ManagementCommand::AddPerformanceEvaluation(PerformanceLevel::from_code(code)?)
            }
            "4" => ManagementCommand::RemovePerformanceEvaluation(
                self.ask_position("Evaluation number: ")?,
            ),
            "5" => {
                let start = self.ask_date("Start Date (YYYY-MM-DD): ")?;
                let end = self.ask_date("End Date (YYYY-MM-DD): ")?;
                let reason = self.ask("Reason: ")?;
                ManagementCommand::AddLeaveRequest(LeaveRequest::new(start, end, reason)?)
            }
            "6" => ManagementCommand::RemoveLeaveRequest(self.ask_position("Leave request number: ")?),
            "7" => ManagementCommand::AddBenefit(self.ask("Benefit: ")?),
            "8" => ManagementCommand::RemoveBenefit(self.ask("Benefit: ")?),
            "9" => return self.show_development(index),
            _ => {
                writeln!(self.out, "Invalid option.")?;
                return Ok(());
            }
        };

        let message = self.service.execute(index, command, (self.clock)())?;
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    fn show_development(&mut self, index: usize) -> Result<(), CliError> {
        let employee = self.service.registry().employee(index)?;

        writeln!(self.out, "Training sessions:")?;
        if employee.training().is_empty() {
            writeln!(self.out, "  None")?;
        }
        for (i, session) in employee.training().iter().enumerate() {
            writeln!(
                self.out,
                "  {}) {} {} - {}",
                i + 1,
                session.date,
                session.time.format(TIME_FORMAT),
                session.description
            )?;
        }

        writeln!(self.out, "Performance evaluations:")?;
        if employee.performance().is_empty() {
            writeln!(self.out, "  None")?;
        }
        for (i, level) in employee.performance().iter().enumerate() {
            writeln!(self.out, "  {}) {}", i + 1, level)?;
        }

        writeln!(self.out, "Leave requests:")?;
        if employee.leave_requests().is_empty() {
            writeln!(self.out, "  None")?;
        }
        for (i, request) in employee.leave_requests().iter().enumerate() {
            writeln!(
                self.out,
                "  {}) {} to {} ({} days) - {}",
                i + 1,
                request.start,
                request.end,
                request.days(),
                request.reason
            )?;
        }

        let benefits = if employee.benefits().is_empty() {
            "None".to_string()
        } else {
            employee.benefits().join(", ")
        };
        writeln!(self.out, "Benefits: {}", benefits)?;
        Ok(())
    }

    fn attendance_menu(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "\n--- Attendance ---")?;
        let index = self.choose_employee("Choose employee: ")?;

        writeln!(self.out, "{}", ATTENDANCE_MENU)?;
        match self.ask("Choose action: ")?.as_str() {
            "1" => {
                let now = (self.clock)();
                self.service.clock_in(index, now)?;
                writeln!(self.out, "Clocked in at {}.", now.format("%Y-%m-%d %H:%M:%S"))?;
            }
            "2" => {
                let now = (self.clock)();
                self.service.clock_out(index, now)?;
                writeln!(self.out, "Clocked out at {}.", now.format("%Y-%m-%d %H:%M:%S"))?;
            }
            "3" => {
                let report = self.service.attendance_report(index, (self.clock)())?;
                writeln!(self.out, "{}", report)?;
            }
            _ => writeln!(self.out, "Invalid option.")?,
        }
        Ok(())
    }

    fn payment(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "\n--- Calculate Payment ---")?;
        let index = self.choose_employee("Choose employee to calculate salary: ")?;
        let breakdown = self.service.calculate_payment(index)?;
        let name = &self.service.employees()[index].name;
        writeln!(self.out, "Payment for {}:\n{}", name, breakdown.summary())?;
        Ok(())
    }

    fn reports_menu(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "\n--- Generate Reports ---")?;
        let index = self.choose_employee("Choose employee for report: ")?;

        writeln!(self.out, "\n{}", REPORTS_MENU)?;
        let report = match self.ask("Choose report type: ")?.as_str() {
            "1" => self.service.attendance_report(index, (self.clock)())?,
            "2" => self.service.compliance_report(index, (self.clock)())?,
            _ => {
                writeln!(self.out, "Invalid report type.")?;
                return Ok(());
            }
        };
        writeln!(self.out, "\n{}", report)?;
        Ok(())
    }

    fn compliance_menu(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "\n--- Compliance ---")?;
        let index = self.choose_employee("Choose employee: ")?;

        writeln!(self.out, "{}", COMPLIANCE_MENU)?;
        match self.ask("Choose action: ")?.as_str() {
            "1" => {
                let date = self.ask_date("Date (YYYY-MM-DD): ")?;
                let description = self.ask("Description: ")?;
                let severity = Severity::from_str(&self.ask("Severity (low/medium/high/critical): ")?)?;
                self.service.add_violation(
                    index,
                    ComplianceViolation {
                        date,
                        description,
                        severity,
                    },
                )?;
                writeln!(self.out, "Violation recorded.")?;
            }
            "2" => {
                let position = self.ask_position("Violation number: ")?;
                let removed = self.service.remove_violation(index, position)?;
                writeln!(self.out, "Violation '{}' removed.", removed.description)?;
            }
            "3" => {
                let report = self.service.compliance_report(index, (self.clock)())?;
                writeln!(self.out, "{}", report)?;
            }
            _ => writeln!(self.out, "Invalid option.")?,
        }
        Ok(())
    }

    fn change_rate(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "\n--- Change Hourly Rate ---")?;
        let index = self.choose_employee("Choose employee: ")?;
        let rate = self.ask_parsed::<Decimal>("New hourly rate: ", "a decimal amount")?;
        let previous = self.service.set_hourly_rate(index, rate)?;
        writeln!(self.out, "Hourly rate updated (was {:.2}).", previous)?;
        Ok(())
    }

    fn flush_notices(&mut self) -> Result<(), CliError> {
        let pending: Vec<String> = self.notices.borrow_mut().drain(..).collect();
        for notice in pending {
            writeln!(self.out, "\n{}", notice)?;
        }
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, CliError> {
        self.prompter
            .read_line(prompt)?
            .map(|line| line.trim().to_string())
            .ok_or(CliError::EndOfInput)
    }

    fn ask_parsed<T: FromStr>(&mut self, prompt: &str, expected: &str) -> Result<T, CliError> {
        let input = self.ask(prompt)?;
        input
            .parse()
            .map_err(|_| CliError::invalid_input(&input, expected))
    }

    fn ask_date(&mut self, prompt: &str) -> Result<NaiveDate, CliError> {
        let input = self.ask(prompt)?;
        NaiveDate::parse_from_str(&input, DATE_FORMAT)
            .map_err(|_| CliError::invalid_input(&input, "a date as YYYY-MM-DD"))
    }

    fn ask_optional_date(&mut self, prompt: &str) -> Result<Option<NaiveDate>, CliError> {
        let input = self.ask(prompt)?;
        if input.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&input, DATE_FORMAT)
            .map(Some)
            .map_err(|_| CliError::invalid_input(&input, "a date as YYYY-MM-DD"))
    }

    fn ask_time(&mut self, prompt: &str) -> Result<NaiveTime, CliError> {
        let input = self.ask(prompt)?;
        NaiveTime::parse_from_str(&input, TIME_FORMAT)
            .map_err(|_| CliError::invalid_input(&input, "a time as HH:MM"))
    }

    /// Reads a 1-based list position and converts it to an index.
    fn ask_position(&mut self, prompt: &str) -> Result<usize, CliError> {
        let input = self.ask(prompt)?;
        input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| CliError::invalid_input(&input, "a number from 1"))
    }

    fn choose_employee(&mut self, prompt: &str) -> Result<usize, CliError> {
        for (i, employee) in self.service.employees().iter().enumerate() {
            writeln!(self.out, "({}) {}", i + 1, employee.name)?;
        }
        self.ask_position(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScriptedPrompter;
    use crate::config::HrConfig;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn run_script(lines: &[&str]) -> (String, Session<ScriptedPrompter, Vec<u8>>) {
        let mut service = HrService::new(HrConfig::default());
        service.seed_demo().unwrap();
        let mut session = Session::new(service, ScriptedPrompter::new(lines.iter().copied()), Vec::new())
            .with_clock(fixed_clock);
        session.run().unwrap();
        let output = String::from_utf8(session.out.clone()).unwrap();
        (output, session)
    }

    #[test]
    fn test_exit_option() {
        let (output, _) = run_script(&["0"]);
        assert!(output.starts_with("Organization: Company\n"));
        assert!(output.contains("(8) Change Hourly Rate"));
        assert!(output.ends_with("Exiting system. Goodbye!\n"));
    }

    #[test]
    fn test_input_exhaustion_ends_session() {
        let (output, _) = run_script(&["1"]);
        assert!(output.ends_with("Input closed. Goodbye!\n"));
    }

    #[test]
    fn test_invalid_choice_loops() {
        let (output, _) = run_script(&["42", "0"]);
        assert!(output.contains("Invalid option, please try again."));
        assert!(output.contains("Exiting system."));
    }

    #[test]
    fn test_rate_change_prints_notice_after_action() {
        let (output, session) = run_script(&["8", "1", "55", "0"]);
        let updated = output.find("Hourly rate updated (was 50.00).").unwrap();
        let notice = output
            .find("PAYROLL NOTICE: hourly rate for 'Jordan Reyes' changed from 50.00 to 55.00.")
            .unwrap();
        assert!(updated < notice);
        assert_eq!(session.service().employees()[0].hourly_rate(), Decimal::new(55, 0));
    }

    #[test]
    fn test_rejected_rate_is_reported() {
        let (output, _) = run_script(&["8", "1", "0", "0"]);
        assert!(output.contains("Error: Invalid hourly rate 0"));
        assert!(!output.contains("PAYROLL NOTICE"));
    }

    #[test]
    fn test_malformed_number_is_reported() {
        let (output, _) = run_script(&["8", "1", "lots", "0"]);
        assert!(output.contains("Error: Invalid input 'lots': expected a decimal amount"));
    }

    #[test]
    fn test_add_employee_form() {
        let (output, session) = run_script(&[
            "1", "2", "Nina", "31", "nina@example.com", "Finance", "Analyst", "25", "", "1", "0",
        ]);
        assert!(output.contains("Employee Nina hired as Regular."));
        assert_eq!(session.service().employees().len(), 4);
        assert!(session.service().hierarchy().contains("+ Finance (1)"));
    }

    #[test]
    fn test_clock_in_then_double_clock_in_fails() {
        let (output, _) = run_script(&["3", "1", "1", "3", "1", "1", "0"]);
        assert!(output.contains("Clocked in at 2026-01-15 09:00:00."));
        assert!(output.contains("Error: Clock state error"));
    }

    #[test]
    fn test_payment_without_attendance_is_reported() {
        let (output, _) = run_script(&["4", "2", "0"]);
        assert!(output.contains("Error: No closed attendance records"));
    }

    #[test]
    fn test_management_benefit_and_show() {
        let (output, session) = run_script(&["2", "3", "7", "Dental", "2", "3", "9", "0"]);
        assert!(output.contains("Benefit 'Dental' granted to Avery Brooks."));
        assert!(output.contains("Benefits: Dental"));
        assert_eq!(session.service().command_history().len(), 1);
    }

    #[test]
    fn test_remove_employee_updates_hierarchy() {
        let (output, session) = run_script(&["1", "3", "2", "7", "0"]);
        assert!(output.contains("Employee Casey Morgan removed."));
        assert!(output.contains("+ Company (2)"));
        assert_eq!(session.service().employees().len(), 2);
    }
}
