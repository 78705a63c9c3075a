//! Command parsing and rendering for the interactive shell.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use staffdesk_core::{ApiClient, Employee, SessionData};

pub const HELP: &str = "\
Commands:
  list             List all employees
  get <id>         Show one employee
  add <json>       Add an employee, e.g. add {\"name\": \"Ada\", \"email\": \"ada@example.com\"}
  delete <id>      Delete an employee
  login            Log in again
  status           Show session status
  help             Show this help
  quit             Exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Get(String),
    Add(Value),
    Delete(String),
    Login,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "get" | "show" => Command::Get(required_arg(rest, "get <id>")?),
            "delete" | "rm" => Command::Delete(required_arg(rest, "delete <id>")?),
            "add" => {
                if rest.is_empty() {
                    bail!("Usage: add <json>");
                }
                let value: Value =
                    serde_json::from_str(rest).context("Employee data is not valid JSON")?;
                if !value.is_object() {
                    bail!("Employee data must be a JSON object");
                }
                Command::Add(value)
            }
            "login" => Command::Login,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command '{}'. Type 'help' for a list of commands.", other),
        };
        Ok(Some(command))
    }
}

/// Exactly one argument, or the usage message
fn required_arg(rest: &str, usage: &str) -> Result<String> {
    let mut args = rest.split_whitespace();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg.to_string()),
        _ => bail!("Usage: {}", usage),
    }
}

/// Run a command that talks to the backend and render its outcome.
///
/// `token` is the one this shell received from its last login; it is passed
/// explicitly to add/get/delete. Listing relies on the client's own session.
pub async fn execute(client: &ApiClient, token: &str, command: &Command) -> String {
    match command {
        Command::List => match client.list_employees().await {
            Ok(employees) => render_list(&employees),
            Err(e) => e.to_string(),
        },
        Command::Get(id) => match client.get_employee(token, id).await {
            Ok(employee) => render_employee(&employee),
            Err(e) => e.to_string(),
        },
        Command::Add(value) => {
            let employee = Employee::from(value.clone());
            match client.add_employee(token, &employee).await {
                Ok(created) => format!("Added employee:\n{}", render_employee(&created)),
                Err(e) => e.to_string(),
            }
        }
        Command::Delete(id) => match client.delete_employee(token, id).await {
            Ok(confirmation) => confirmation.message,
            Err(e) => e.to_string(),
        },
        Command::Status => render_status(client.session_data().await.as_ref()),
        Command::Help => HELP.to_string(),
        Command::Login | Command::Quit => String::new(),
    }
}

pub fn render_list(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees found.".to_string();
    }

    let rows: Vec<(String, String)> = employees
        .iter()
        .map(|e| (e.id().unwrap_or_else(|| "-".to_string()), e.display_name()))
        .collect();
    let width = rows.iter().map(|(id, _)| id.len()).max().unwrap_or(0);

    let mut out: Vec<String> = rows
        .iter()
        .map(|(id, name)| format!("{:<width$}  {}", id, name, width = width))
        .collect();
    out.push(format!("{} employee(s)", employees.len()));
    out.join("\n")
}

pub fn render_employee(employee: &Employee) -> String {
    serde_json::to_string_pretty(employee.as_value())
        .unwrap_or_else(|_| employee.as_value().to_string())
}

pub fn render_status(session: Option<&SessionData>) -> String {
    match session {
        Some(data) => format!(
            "Logged in since {} ({}m ago)",
            data.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            data.age_minutes()
        ),
        None => "Not logged in".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::with_base_url(format!("{}/api", server.uri())).expect("Failed to build client")
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("list").unwrap(), Some(Command::List));
        assert_eq!(Command::parse("  LS  ").unwrap(), Some(Command::List));
        assert_eq!(Command::parse("status").unwrap(), Some(Command::Status));
        assert_eq!(Command::parse("login").unwrap(), Some(Command::Login));
        assert_eq!(Command::parse("help").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_id_commands() {
        assert_eq!(Command::parse("get 42").unwrap(), Some(Command::Get("42".to_string())));
        assert_eq!(
            Command::parse("delete  abc123 ").unwrap(),
            Some(Command::Delete("abc123".to_string()))
        );
        assert!(Command::parse("get").is_err());
        assert!(Command::parse("delete").is_err());

        let err = Command::parse("get 1 2").unwrap_err();
        assert_eq!(err.to_string(), "Usage: get <id>");
        let err = Command::parse("delete 1 2").unwrap_err();
        assert_eq!(err.to_string(), "Usage: delete <id>");
    }

    #[test]
    fn test_parse_add() {
        let cmd = Command::parse(r#"add {"name": "Ada", "tags": ["a b"]}"#).unwrap();
        assert_eq!(cmd, Some(Command::Add(json!({"name": "Ada", "tags": ["a b"]}))));

        assert!(Command::parse("add").is_err());
        assert!(Command::parse("add not-json").is_err());
        assert!(Command::parse("add [1, 2]").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("fire everyone").unwrap_err();
        assert!(err.to_string().contains("Unknown command 'fire'"));
    }

    #[test]
    fn test_render_list() {
        assert_eq!(render_list(&[]), "No employees found.");

        let employees = vec![
            Employee::new(json!({"_id": "1", "name": "Ada"})),
            Employee::new(json!({"_id": "1234", "firstName": "Grace", "lastName": "Hopper"})),
        ];
        assert_eq!(
            render_list(&employees),
            "1     Ada\n1234  Grace Hopper\n2 employee(s)"
        );
    }

    #[test]
    fn test_render_status() {
        assert_eq!(render_status(None), "Not logged in");

        let data = SessionData::new("tok".to_string());
        let status = render_status(Some(&data));
        assert!(status.starts_with("Logged in since"));
        assert!(!status.contains("tok"));
    }

    #[tokio::test]
    async fn test_execute_list_without_login() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9/api")
            .expect("Failed to build client");
        assert_eq!(execute(&client, "", &Command::List).await, "Not authenticated");
        assert_eq!(execute(&client, "", &Command::Status).await, "Not logged in");
    }

    #[tokio::test]
    async fn test_execute_get_sends_shell_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/employees/7"))
            .and(header("authorization", "Bearer shell-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "7"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let out = execute(&client, "shell-token", &Command::Get("7".to_string())).await;
        assert_eq!(out, "{\n  \"_id\": \"7\"\n}");
    }

    #[tokio::test]
    async fn test_execute_add_sends_shell_token_and_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/employees"))
            .and(header("authorization", "Bearer shell-token"))
            .and(body_json(json!({"name": "Ada"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "9"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let out = execute(&client, "shell-token", &Command::Add(json!({"name": "Ada"}))).await;
        assert!(out.starts_with("Added employee:"));
        assert!(out.contains("\"_id\": \"9\""));
    }

    #[tokio::test]
    async fn test_execute_delete_sends_shell_token() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/employees/7"))
            .and(header("authorization", "Bearer shell-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let out = execute(&client, "shell-token", &Command::Delete("7".to_string())).await;
        assert_eq!(out, "Employee deleted successfully");
    }

    #[tokio::test]
    async fn test_execute_failed_delete_renders_fixed_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/employees/7"))
            .respond_with(ResponseTemplate::new(500).set_body_string("stack trace here"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let out = execute(&client, "shell-token", &Command::Delete("7".to_string())).await;
        assert_eq!(out, "Failed to delete employee");
    }
}
