use safecalc_rs::tool::{calculate, CalculateRequest, ResponseFormat};
use safecalc_rs::Calculator;

fn main() {
    pretty_env_logger::init();

    let calculator = Calculator::new();

    for expression in [
        "2 + 3 * 4 - 1",
        "sqrt(16) + sin(pi / 2)",
        "2 ** 3 ** 2",
        "2x + 3 = 7",
        "mean([1, 2, 3, 4, 5])",
    ] {
        let request = CalculateRequest::new(expression).format(ResponseFormat::Markdown);
        match calculate(&calculator, &request) {
            safecalc_rs::tool::ToolResponse::Markdown(report) => {
                println!("{}\n", report);
            }
            other => println!("{:?}", other),
        }
    }
}
