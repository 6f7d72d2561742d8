//! Alert text for the notification channel.

use crate::models::signal::SignalEvent;

/// Render one emitted signal as a Markdown alert message.
pub fn format_signal_message(event: &SignalEvent) -> String {
    format!(
        "*{signal} {symbol}* @ {price:.2}\n\
         RSI {rsi:.1} | MACD {macd:.4} | %K {k:.1}\n\
         SL {sl:.2} | TP {tp:.2}",
        signal = event.signal,
        symbol = event.symbol,
        price = event.entry_price,
        rsi = event.indicators.rsi,
        macd = event.indicators.macd,
        k = event.indicators.stochastic_k,
        sl = event.risk.stop_loss,
        tp = event.risk.take_profit,
    )
}
