use shadexpr_parser::{to_source, Parser};

fn main() {
    let code = "(float)(a.b[0] + vec3(1, 2, 3).x) * -c ? max(d, 2.5) : m[i][j]++";

    let mut parser = Parser::new(code.as_bytes());
    let Some(root) = parser.parse() else {
        println!("Parse error: {}", parser.error_message());
        return;
    };
    if parser.has_error() {
        println!("Parse error: {}", parser.error_message());
        return;
    }

    println!("{}", to_source(parser.arena(), root));
    println!("{} nodes", parser.arena().len());
    println!("inputs: {}", parser.arena().identifiers().join(", "));
}
