//! Static read-only resources and prompt templates served alongside the
//! calculator tools. Pure text, no computation.

/// Markdown listing of the commonly used mathematical constants.
pub fn mathematical_constants() -> String {
    let constants = [
        ("π (Pi)", "3.14159265359"),
        ("e (Euler's Number)", "2.71828182846"),
        ("φ (Golden Ratio)", "1.61803398875"),
        ("√2 (Square Root of 2)", "1.41421356237"),
        ("√3 (Square Root of 3)", "1.73205080757"),
    ];

    let mut content = String::from("# Mathematical Constants\n\n");
    for (name, value) in constants {
        content.push_str(&format!("- **{}**: {}\n", name, value));
    }
    content
}

/// Markdown listing of common formulas.
pub fn common_formulas() -> String {
    let formulas = [
        "Area of Circle: A = πr²",
        "Area of Triangle: A = ½bh",
        "Quadratic Formula: x = (-b ± √(b²-4ac)) / 2a",
        "Pythagorean Theorem: a² + b² = c²",
        "Distance Formula: d = √[(x₂-x₁)² + (y₂-y₁)²]",
        "Slope Formula: m = (y₂-y₁) / (x₂-x₁)",
    ];

    let mut content = String::from("# Common Mathematical Formulas\n\n");
    for (index, formula) in formulas.iter().enumerate() {
        content.push_str(&format!("{}. {}\n", index + 1, formula));
    }
    content
}

/// Prompt template walking through a structured approach to a math problem.
pub fn math_problem_solver(problem: &str) -> String {
    format!(
        r#"You are a mathematical problem solver. Please help solve this problem:

**Problem:** {}

**Structured Approach:**
1. **Understand the Problem**
   - What are we trying to find?
   - What information is given?
   - Are there any constraints or assumptions?

2. **Identify the Method**
   - What mathematical concepts apply?
   - Which formulas or techniques are relevant?
   - Is there a preferred approach?

3. **Step-by-step Solution**
   - Show each calculation clearly
   - Explain the reasoning
   - Verify each step

4. **Final Answer**
   - State the result clearly
   - Check if it makes sense
   - Consider alternative approaches if applicable

Please provide a detailed, educational solution."#,
        problem
    )
}

/// Prompt template asking for verification of a finished calculation.
pub fn calculation_checker(calculation: &str) -> String {
    format!(
        r#"Please review and explain this mathematical calculation:

**Calculation:** {}

**Please provide:**
1. **Verification** - Is the calculation correct?
2. **Step-by-step breakdown** - Show how to arrive at the result
3. **Method explanation** - What mathematical principles are being used?
4. **Alternative approaches** - Are there other ways to solve this?
5. **Common pitfalls** - What mistakes should be avoided in similar calculations?

Provide an educational explanation that helps understand both the process and the underlying mathematics."#,
        calculation
    )
}
