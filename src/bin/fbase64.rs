use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::Parser;

use fbase64_rs::base64::core as b64;
use fbase64_rs::base64::{Alphabet, Codec, PAD};
use fbase64_rs::common::io::read_file;
use fbase64_rs::common::{gnu_name, io_error_msg};

#[derive(Parser)]
#[command(
    name = "base64",
    about = "Base64 encode or decode FILE, or standard input, to standard output.",
    after_help = "With no FILE, or when FILE is -, read standard input.\n\n\
        The data are encoded as described for the base64 alphabet in RFC 4648.\n\
        When decoding, the input may contain whitespace in addition to the bytes of\n\
        the formal base64 alphabet.  Use --ignore-garbage to attempt to recover\n\
        from any other non-alphabet bytes in the encoded stream.",
    version
)]
struct Cli {
    /// Decode data
    #[arg(short = 'd', long = "decode")]
    decode: bool,

    /// When decoding, ignore non-alphabet characters
    #[arg(short = 'i', long = "ignore-garbage")]
    ignore_garbage: bool,

    /// Wrap encoded lines after COLS character (default 76).
    /// Use 0 to disable line wrapping
    #[arg(short = 'w', long = "wrap", value_name = "COLS", default_value = "76")]
    wrap: usize,

    /// Use the URL and filename safe alphabet ('-' and '_', unpadded)
    #[arg(long = "url", conflicts_with = "extra_chars")]
    url: bool,

    /// The two symbols completing the alphabet after A-Z, a-z and 0-9
    #[arg(long = "extra-chars", value_name = "XY")]
    extra_chars: Option<String>,

    /// Pad symbol (default '=', none with --url)
    #[arg(long = "pad", value_name = "CHAR", conflicts_with = "no_padding")]
    pad: Option<char>,

    /// Neither emit nor accept padding
    #[arg(long = "no-padding")]
    no_padding: bool,

    /// Separate wrapped lines with CR LF instead of LF
    #[arg(long = "crlf")]
    crlf: bool,

    /// File to process (reads stdin if omitted or -)
    file: Option<String>,
}

impl Cli {
    fn codec(&self) -> anyhow::Result<Codec> {
        let alphabet = match (&self.extra_chars, self.url) {
            (Some(extra), _) => Alphabet::new(extra)
                .with_context(|| format!("invalid --extra-chars {:?}", extra))?,
            (None, true) => Alphabet::URL_SAFE,
            (None, false) => Alphabet::STANDARD,
        };

        let pad = if self.no_padding {
            None
        } else if self.pad.is_some() {
            self.pad
        } else if self.url {
            None
        } else {
            Some(PAD)
        };

        let separator = if self.crlf { "\r\n" } else { "\n" };
        Codec::new(alphabet, pad, self.wrap, Some(separator)).context("invalid codec options")
    }
}

fn main() {
    fbase64_rs::common::reset_sigpipe();

    let argv0 = std::env::args().next().unwrap_or_default();
    let binary = Path::new(&argv0)
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("fbase64");
    let tool = gnu_name(binary);

    let cli = Cli::parse();

    let codec = match cli.codec() {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("{}: {:#}", tool, e);
            process::exit(1);
        }
    };

    let filename = cli.file.as_deref().unwrap_or("-");

    let stdout = io::stdout();
    let mut out = io::BufWriter::with_capacity(2 * 1024 * 1024, stdout.lock());
    let result = process(filename, &cli, &codec, &mut out).and_then(|()| out.flush());

    if let Err(e) = result {
        if e.kind() == io::ErrorKind::BrokenPipe {
            process::exit(0);
        }
        if filename != "-" {
            eprintln!("{}: {}: {}", tool, filename, io_error_msg(&e));
        } else {
            eprintln!("{}: {}", tool, io_error_msg(&e));
        }
        process::exit(1);
    }
}

fn process(filename: &str, cli: &Cli, codec: &Codec, out: &mut impl Write) -> io::Result<()> {
    if filename == "-" {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        return if cli.decode {
            b64::decode_stream(codec, &mut reader, cli.ignore_garbage, out)
        } else {
            b64::encode_stream(codec, &mut reader, out)
        };
    }
    let data = read_file(Path::new(filename))?;
    run(&data, cli, codec, out)
}

fn run(data: &[u8], cli: &Cli, codec: &Codec, out: &mut impl Write) -> io::Result<()> {
    if cli.decode {
        b64::decode_to_writer(codec, data, cli.ignore_garbage, out)
    } else {
        b64::encode_to_writer(codec, data, out)
    }
}
