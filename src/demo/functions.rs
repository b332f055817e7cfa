//! Stateless handlers.

use thiserror::Error;

use super::models::{AddNumbersQuery, CalculateQuery, Operator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    #[error("cannot divide {0} by zero")]
    DivideByZero(i64),

    #[error("{operator} overflowed for {number1} and {number2}")]
    Overflow {
        operator: Operator,
        number1: i64,
        number2: i64,
    },
}

pub fn hello() -> String {
    "Hello world!".to_string()
}

pub fn add_numbers(query: AddNumbersQuery) -> Result<i64, CalculationError> {
    let AddNumbersQuery { number1, number2 } = query;
    number1.checked_add(number2).ok_or(CalculationError::Overflow {
        operator: Operator::Plus,
        number1,
        number2,
    })
}

pub fn calculate(query: CalculateQuery) -> Result<i64, CalculationError> {
    let CalculateQuery {
        operator,
        number1,
        number2,
    } = query;
    let result = match operator {
        Operator::Plus => number1.checked_add(number2),
        Operator::Minus => number1.checked_sub(number2),
        Operator::Times => number1.checked_mul(number2),
        Operator::Divide if number2 == 0 => return Err(CalculationError::DivideByZero(number1)),
        Operator::Divide => number1.checked_div(number2),
    };
    result.ok_or(CalculationError::Overflow {
        operator,
        number1,
        number2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(operator: Operator, number1: i64, number2: i64) -> CalculateQuery {
        CalculateQuery {
            operator,
            number1,
            number2,
        }
    }

    #[test]
    fn test_calculate() {
        assert_eq!(calculate(query(Operator::Plus, 1, 2)), Ok(3));
        assert_eq!(calculate(query(Operator::Minus, 1, 2)), Ok(-1));
        assert_eq!(calculate(query(Operator::Times, 4, 3)), Ok(12));
        assert_eq!(calculate(query(Operator::Divide, 9, 3)), Ok(3));
    }

    #[test]
    fn test_calculate_failures() {
        assert_eq!(
            calculate(query(Operator::Divide, 9, 0)),
            Err(CalculationError::DivideByZero(9))
        );
        assert!(matches!(
            calculate(query(Operator::Times, i64::MAX, 2)),
            Err(CalculationError::Overflow { .. })
        ));
    }

    #[test]
    fn test_add_numbers() {
        assert_eq!(add_numbers(AddNumbersQuery { number1: 2, number2: 5 }), Ok(7));
        assert!(matches!(
            add_numbers(AddNumbersQuery { number1: i64::MAX, number2: 1 }),
            Err(CalculationError::Overflow { operator: Operator::Plus, .. })
        ));
        assert_eq!(hello(), "Hello world!");
    }
}
