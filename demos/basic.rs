//! Basic example: stack arithmetic with undo
//!
//! This example demonstrates:
//! - Pushing values and applying operators
//! - Recovering from a division by zero
//! - Undoing the last operation

use upncalc::numeric::parse_value;
use upncalc::*;

fn print_stack(engine: &CalculatorEngine) {
    let values: Vec<String> = engine.peek_all().iter().map(|v| v.to_string()).collect();
    println!("  stack: [{}]", values.join(", "));
}

fn main() -> Result<(), CalcError> {
    let mut engine = CalculatorEngine::new();

    println!("Pushing 3 and 4:");
    engine.push(CalcValue::from(3));
    engine.push(CalcValue::from(4));
    print_stack(&engine);

    println!("\nApplying +:");
    let sum = engine.apply_binary(BinaryOperator::Add)?;
    println!("  result: {}", sum);
    print_stack(&engine);

    println!("\nUndo:");
    engine.undo();
    print_stack(&engine);

    println!("\nDividing 2 by 0:");
    engine.clear_all();
    engine.push(CalcValue::from(2));
    engine.push(CalcValue::ZERO);
    match engine.apply_binary(BinaryOperator::Divide) {
        Ok(value) => println!("  result: {}", value),
        Err(err) => println!("  error: {}", err),
    }
    print_stack(&engine);

    println!("\nSquare root of 2 and 1/3:");
    engine.clear_all();
    engine.push(CalcValue::from(2));
    println!("  √2  = {}", engine.apply_unary(UnaryOperator::SquareRoot)?);
    engine.push(CalcValue::from(3));
    println!("  1/3 = {}", engine.apply_unary(UnaryOperator::Reciprocal)?);

    println!("\nExact decimals: 0.1 + 0.2");
    engine.clear_all();
    engine.push(parse_value("0.1")?);
    engine.push(parse_value("0.2")?);
    println!("  = {}", engine.add()?);

    println!("\nπ = {}", engine.pi());

    Ok(())
}
