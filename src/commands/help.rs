pub fn execute() -> String {
    [
        "📖 divisa commands",
        "",
        "  convert [amount] <divisa>   Convert an amount in pesos using the latest rate window",
        "                              and redraw the chart (aliases: c, $convert)",
        "                              A missing amount counts as 0",
        "  list                        Show the available currency/indicator codes",
        "  help                        Show this help message",
        "  quit                        Leave the session",
        "",
        "Example: convert 1000 dolar",
    ]
    .join("\n")
}
