use clap::{arg, crate_version, Command};
use huffcodec::{compress, expand, Variant};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help = "\
Examples:
---------
Compress:   `huffcodec compress -m adaptive -i my_text.txt -o my_text.huff`
Expand:     `huffcodec expand -m adaptive -i my_text.huff -o my_text.txt`";

    let variants = ["static", "classic", "adaptive"];

    let mut main_cmd = Command::new("huffcodec")
        .about("Compress and expand UTF-8 text with static, classic, or adaptive Huffman coding")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("compress")
            .arg(arg!(-m --method <VARIANT> "codec variant").value_parser(variants).required(true))
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .about("compress a text file"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("expand")
            .arg(arg!(-m --method <VARIANT> "codec variant").value_parser(variants).required(true))
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .about("expand a compressed file"),
    );

    let matches = main_cmd.clone().get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let method = cmd.get_one::<String>("method").expect(RCH);
        let variant: Variant = method.parse().expect(RCH);
        let text = std::fs::read_to_string(path_in)?;
        log::info!("compressing {} ({} chars) with {} codec", path_in, text.chars().count(), method);
        let framed = compress(&text, variant)?;
        log::debug!("wrote {} bytes to {}", framed.len(), path_out);
        std::fs::write(path_out, framed)?;
        return Ok(());
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let method = cmd.get_one::<String>("method").expect(RCH);
        let variant: Variant = method.parse().expect(RCH);
        let bytes = std::fs::read(path_in)?;
        log::info!("expanding {} ({} bytes) with {} codec", path_in, bytes.len(), method);
        let text = expand(&bytes, variant)?;
        log::debug!("wrote {} chars to {}", text.chars().count(), path_out);
        std::fs::write(path_out, text)?;
        return Ok(());
    }

    // Neither subcommand matched: print usage and exit cleanly rather
    // than erroring.
    main_cmd.print_long_help()?;
    println!();
    Ok(())
}
