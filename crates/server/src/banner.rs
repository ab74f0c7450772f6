pub fn print_banner(version: &str) {
    let banner = format!(
        r#"
 ███╗   ███╗ ██████╗ ██╗   ██╗██╗███████╗
 ████╗ ████║██╔═══██╗██║   ██║██║██╔════╝    movieinfo
 ██╔████╔██║██║   ██║██║   ██║██║█████╗      v{}
 ██║╚██╔╝██║██║   ██║╚██╗ ██╔╝██║██╔══╝
 ██║ ╚═╝ ██║╚██████╔╝ ╚████╔╝ ██║███████╗
 ╚═╝     ╚═╝ ╚═════╝   ╚═══╝  ╚═╝╚══════╝
"#,
        version
    );

    tracing::info!("{}", banner);
}
