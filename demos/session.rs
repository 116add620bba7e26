//! Session example: driving the calculator the way a keypad front-end does
//!
//! Each argument is a line of key presses. Digits and `.` type into the
//! pending input, `+ - * /` apply operators, and a newline pushes.
//! Without arguments a fixed calculation is replayed.
//!
//! ```text
//! cargo run --example session -- "3\n4+" "2*"
//! ```

use upncalc::*;

fn render(session: &Session) {
    let values: Vec<String> = session.stack().iter().map(|v| v.to_string()).collect();
    println!("  stack: [{}]  input: '{}'", values.join(", "), session.input());
}

fn report(outcome: Result<Option<CalcValue>, CalcError>) {
    match outcome {
        Ok(Some(value)) => println!("  result: {}", value),
        Ok(None) => {}
        Err(err) => println!("  {} ({})", Session::ERROR_MESSAGE, err),
    }
}

fn main() {
    let args: Vec<String> = std::env::args()
        .skip(1)
        .map(|a| a.replace("\\n", "\n"))
        .collect();
    let lines = if args.is_empty() {
        vec!["3\n4+".to_string(), "2*".to_string(), "0/".to_string()]
    } else {
        args
    };

    let mut session = Session::new();
    for line in &lines {
        println!("keys {:?}", line);
        if let Err(err) = session.type_text(line) {
            println!("  {} ({})", Session::ERROR_MESSAGE, err);
        }
        render(&session);
    }

    println!("undo");
    report(session.execute(Command::Undo));
    render(&session);

    println!("recall bottom entry, square it");
    report(session.execute(Command::Recall(0)));
    report(session.execute(Command::Unary(UnaryOperator::Square)));
    render(&session);
}
