use blindrf_shared::channel::Channel;
use blindrf_shared::codec::encode_transmission;
use blindrf_shared::{Button, Registry};

/// Print the frames a remote sends for one button press.
pub fn transmit(
    remotes: &Registry,
    remote_id: u8,
    channel: Channel,
    button: Button,
    json: bool,
) -> anyhow::Result<()> {
    if button == Button::Trailer {
        log::warn!("TRAILER is sent after UP/DOWN, not on its own");
    }

    let tx = encode_transmission(remote_id, channel, button);

    log::info!(
        "Remote 0x{:02x} ({}), ch {}, {}",
        remote_id,
        remotes.label(remote_id),
        channel,
        button
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&tx)?);
        return Ok(());
    }

    println!("Action:  {}", tx.action);
    if let Some(trailer) = tx.trailer {
        println!("Trailer: {}", trailer);
    }

    Ok(())
}

/// Channel, field and offset for every channel.
pub fn print_table() {
    println!("Channel | Field  | Offset");
    println!("--------|--------|-------");

    for channel in Channel::iter() {
        println!(
            "{:>7} | 0x{:04x} | {:>6}",
            channel.to_string(),
            channel.field(),
            channel.offset()
        );
    }
}
