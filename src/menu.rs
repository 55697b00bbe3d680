use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Local;

use crate::application::task_service::TaskService;
use crate::domain::task::{DueDateDirective, Task, TaskStatus, UpdateOutcome};

const CLEAR_DUE_DATE_INPUT: &str = "-";

pub fn run<S: TaskService>(service: &S) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        println!("\n#---------- CURRENT TASKS ----------#");
        match service.list(Some(TaskStatus::Active)) {
            Ok(tasks) => print_numbered(&tasks),
            Err(err) => println!("Error: {err}"),
        }
        println!("#------------------#");
        println!("Choose an action:");
        println!("1 - Create a new task");
        println!("2 - Complete a task");
        println!("3 - Edit a task");
        println!("4 - Show completed tasks");
        println!("5 - Erase all completed tasks");
        println!("6 - Wipe the whole database");
        println!("0 - Exit");
        let Some(choice) = prompt(&mut input, "Action number: ")? else { break };
        match choice.as_str() {
            "1" => new_task(service, &mut input)?,
            "2" => complete_task(service, &mut input)?,
            "3" => edit_task(service, &mut input)?,
            "4" => show_completed(service),
            "5" => erase_completed(service),
            "6" => wipe_database(service, &mut input)?,
            "0" => break,
            _ => println!("Unknown command"),
        }
    }
    println!("Bye.");
    Ok(())
}

fn new_task<S: TaskService>(service: &S, input: &mut impl BufRead) -> Result<()> {
    println!("#------------------#");
    let Some(raw) = prompt(input, "Enter the new task (description [due date]) or 0 to go back: ")?
    else {
        return Ok(());
    };
    if raw == "0" {
        return Ok(());
    }
    let (description, due_date) = parse_task_input(&raw);
    match service.create(&description, &due_date) {
        Ok(_) => println!("Task added."),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn complete_task<S: TaskService>(service: &S, input: &mut impl BufRead) -> Result<()> {
    println!("#------------------#");
    let Some((position, _)) = pick_active_task(service, input, "complete")? else {
        return Ok(());
    };
    match service.complete_nth_active(position) {
        Ok(task) => println!("Task {position} completed: {}", task.description),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn edit_task<S: TaskService>(service: &S, input: &mut impl BufRead) -> Result<()> {
    println!("#------------------#");
    let Some((position, current)) = pick_active_task(service, input, "edit")? else {
        return Ok(());
    };
    println!("\nEditing task #{position}:");
    println!("Current description: {}", current.description);
    println!("Current due date: {}", current.due_date.as_deref().unwrap_or(""));

    let Some(description_input) =
        prompt(input, "New description (Enter keeps the current one): ")?
    else {
        return Ok(());
    };
    let Some(due_date_input) = prompt(
        input,
        "New due date (Enter keeps the current one, \"-\" clears it): ",
    )?
    else {
        return Ok(());
    };

    let new_description =
        if description_input.is_empty() { None } else { Some(description_input) };
    let directive = match due_date_input.as_str() {
        "" => DueDateDirective::Unchanged,
        CLEAR_DUE_DATE_INPUT => DueDateDirective::Clear,
        text => DueDateDirective::Set(text.to_string()),
    };

    match service.update_nth_active(position, new_description, directive) {
        Ok(UpdateOutcome::Updated(_)) => println!("Task {position} updated."),
        Ok(UpdateOutcome::NoChange) => println!("No changes made."),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn show_completed<S: TaskService>(service: &S) {
    println!("#------------------#");
    println!("Completed tasks:");
    match service.list(Some(TaskStatus::Done)) {
        Ok(tasks) => print_numbered(&tasks),
        Err(err) => println!("Error: {err}"),
    }
    println!("#------------------#");
}

fn erase_completed<S: TaskService>(service: &S) {
    println!("#------------------#");
    match service.erase_completed() {
        Ok(0) => println!("No completed tasks to remove."),
        Ok(removed) => println!("Removed completed tasks: {removed}"),
        Err(err) => println!("Error: {err}"),
    }
    println!("#------------------#");
}

fn wipe_database<S: TaskService>(service: &S, input: &mut impl BufRead) -> Result<()> {
    println!("#------------------#");
    println!("!!! WARNING !!!");
    println!("This removes ALL tasks, active and completed.");
    let Some(confirmation) = prompt(input, "Are you sure? (type \"yes\" to confirm): ")? else {
        return Ok(());
    };
    if confirmation.eq_ignore_ascii_case("yes") {
        match service.wipe_all() {
            Ok(()) => println!("Database wiped."),
            Err(err) => println!("Error: {err}"),
        }
    } else {
        println!("Wipe cancelled.");
    }
    println!("#------------------#");
    Ok(())
}

// Shows the numbered Active list and reads a 1-based position, returning it
// with the task shown at that position; None means the user backed out (or
// stdin closed). The service re-checks the selection against fresh state.
fn pick_active_task<S: TaskService>(
    service: &S,
    input: &mut impl BufRead,
    verb: &str,
) -> Result<Option<(usize, Task)>> {
    let tasks = match service.list(Some(TaskStatus::Active)) {
        Ok(tasks) => tasks,
        Err(err) => {
            println!("Error: {err}");
            return Ok(None);
        }
    };
    if tasks.is_empty() {
        println!("No active tasks to {verb}.");
        return Ok(None);
    }
    println!("Active tasks:");
    print_numbered(&tasks);
    let Some(raw) = prompt(input, &format!("\nTask number to {verb} (0 to go back): "))? else {
        return Ok(None);
    };
    if raw == "0" {
        return Ok(None);
    }
    let position = match raw.parse::<usize>() {
        Ok(position) => position,
        Err(_) => {
            println!("Error: enter a numeric task number.");
            return Ok(None);
        }
    };
    let Some(task) = (position > 0).then(|| tasks.get(position - 1)).flatten() else {
        println!("Error: no active task at position {position}");
        return Ok(None);
    };
    Ok(Some((position, task.clone())))
}

fn print_numbered(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("The task list is empty.");
        return;
    }
    let now = Local::now().naive_local();
    for (index, task) in tasks.iter().enumerate() {
        println!("{}: {}", index + 1, task.display_line(now));
    }
}

// None on EOF so the caller can exit cleanly.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// Creation input comes as one line, "description [due date]"; everything
// after the first "[" up to a trailing "]" is the due-date text.
fn parse_task_input(raw: &str) -> (String, String) {
    match raw.split_once('[') {
        Some((description, rest)) => {
            let rest = rest.trim();
            let due_date = rest.strip_suffix(']').unwrap_or(rest).trim();
            (description.trim().to_string(), due_date.to_string())
        }
        None => (raw.trim().to_string(), String::new()),
    }
}
