use clap::{Arg, Command};
use interwiki_translate::{
    ApiReplica, DEFAULT_USER_AGENT, HttpWikiApi, LinkTranslator, MockReplica, MockWikiApi,
    PageLink, ReplicaAccess, TranslationRequest, WikiApi, mask_spans,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("interwiki_translate=info".parse()?),
        )
        .init();

    let matches = Command::new("interwiki-translate")
        .version("0.1.0")
        .about("Translates the internal links of a wiki article, following interwikis")
        .arg(
            Arg::new("article")
                .help("Source article title")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target")
                .help("Target project code (e.g. fr)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source project code (default: en)")
                .default_value("en"),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .short('n')
                .help("Namespace id of the article")
                .default_value("0"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .short('t')
                .help("Rewrite the article text instead of listing the links")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trim")
                .long("trim")
                .help("Don't print links without interwiki")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the link table as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the built-in offline fixture instead of the live API")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("user-agent")
                .long("user-agent")
                .help("User agent for outgoing requests"),
        )
        .get_matches();

    let article = matches.get_one::<String>("article").unwrap();
    let target = matches.get_one::<String>("target").unwrap();
    let source = matches.get_one::<String>("source").unwrap();
    let namespace: i64 = matches.get_one::<String>("namespace").unwrap().parse()?;

    let request = TranslationRequest::new(source, target, article).with_namespace_id(namespace)?;

    let (replica, api): (Arc<dyn ReplicaAccess>, Arc<dyn WikiApi>) = if matches.get_flag("mock") {
        let (replica, api) = demo_fixture();
        (Arc::new(replica), Arc::new(api))
    } else {
        let user_agent = matches
            .get_one::<String>("user-agent")
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENT);
        (
            Arc::new(ApiReplica::with_user_agent(user_agent)?),
            Arc::new(HttpWikiApi::with_user_agent(user_agent)?),
        )
    };

    let translator = LinkTranslator::new(request, replica, api)?;
    let table = translator.translate_links().await?;

    if matches.get_flag("text") {
        // The original article text, with template regions protected from
        // substitution, then the attribution template on top
        let text = translator.fetch_raw_text().await?;
        let masked = mask_spans(&text, "{{", "}}");
        let substituted = translator.substitute_links(masked.text(), &table);
        let revision_id = translator.latest_revision_id().await?;

        println!("{}", translator.attribution_template(&table, revision_id));
        println!();
        println!("{}", masked.unmask(&substituted));
    } else if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        let trim = matches.get_flag("trim");
        for pair in table.pairs() {
            match &pair.target {
                Some(target) => println!("{}\t{}", pair.source, target),
                None if trim => {}
                None => println!("{}\t(no interwiki)", pair.source),
            }
        }
    }

    Ok(())
}

/// A small offline wiki so the tool can be tried without network access
///
/// Mirrors the canonical example: translating [[en:Metasyntactic variable]]
/// to fr.
fn demo_fixture() -> (MockReplica, MockWikiApi) {
    let replica = MockReplica::new()
        .with_page("enwiki", 0, "Metasyntactic_variable", 1)
        .with_revision("enwiki", 0, "Metasyntactic_variable", 123456)
        .with_links(
            "enwiki",
            1,
            vec![
                PageLink::new(0, "Computer_programming"),
                PageLink::new(0, "Foobar"),
                PageLink::new(0, "Hacker_culture"),
            ],
        )
        .with_page("enwiki", 0, "Computer_programming", 10)
        .with_language_link("enwiki", 10, "fr", "Programmation informatique")
        .with_page("enwiki", 0, "Foobar", 11)
        .with_language_link("enwiki", 11, "fr", "Foobar")
        .with_page("enwiki", 0, "Hacker_culture", 12);

    let api = MockWikiApi::new().with_text(
        "enwiki",
        "Metasyntactic_variable",
        "A '''metasyntactic variable''' such as [[Foobar]] is used in\n\
         [[Computer programming|programming]] examples. See [[Hacker culture]].\n",
    );

    (replica, api)
}
