use safecalc_rs::tool::{calculate, CalculateRequest, ResponseFormat};
use safecalc_rs::Calculator;

fn main() {
    pretty_env_logger::init();

    let calculator = Calculator::new();
    let input = "2 + 3; 1 / 0; 4 * 5; stdev([1, 2, 3, 4])";

    let request = CalculateRequest::new(input).format(ResponseFormat::Structured);
    match calculate(&calculator, &request) {
        safecalc_rs::tool::ToolResponse::Structured(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload).unwrap());
        }
        other => println!("{:?}", other),
    }
}
