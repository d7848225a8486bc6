//! Integration tests for the format-and-validate pipeline

use pretty_assertions::assert_eq;
use xaml_fmt::{
    format_and_validate, locate, normalize, parse, Config, ExtensionRegistry, Finding, RuleEngine,
    XamlFormatter,
};

const PAGE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Page xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation"
      xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
      xmlns:controls="using:CommunityToolkit.WinUI.UI.Controls">
    <Page.Resources>
        <SolidColorBrush x:Key="AccentBrush" Color="Teal" />
    </Page.Resources>
    <!-- layout -->
    <Grid Background="{StaticResource AccentBrush}">
        <TextBlock Text="Orders" FontSize="24" Grid.Row="0" />
        <Button Content="Refresh" Click="OnRefresh" />
        <controls:DataGrid ItemsSource="{x:Bind Orders}" AutoGenerateColumns="False" />
    </Grid>
</Page>
"#;

const PAGE_FORMATTED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Page xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" xmlns:controls="using:CommunityToolkit.WinUI.UI.Controls">
  <Page.Resources>
    <SolidColorBrush x:Key="AccentBrush" Color="Teal" />
  </Page.Resources>
  <!-- layout -->
  <Grid Background="{StaticResource AccentBrush}">
    <TextBlock Text="Orders" FontSize="24" Grid.Row="0" />
    <Button Content="Refresh" Click="OnRefresh" />
    <controls:DataGrid ItemsSource="{x:Bind Orders}" AutoGenerateColumns="False" />
  </Grid>
</Page>
"#;

#[test]
fn test_page_formatting() {
    let output = format_and_validate(PAGE);
    assert_eq!(output.formatted, PAGE_FORMATTED);
}

#[test]
fn test_page_findings() {
    let output = format_and_validate(PAGE);
    // Property elements are not in the vocabulary, and only the root's own
    // prefix counts as declared
    assert_eq!(
        output.messages(),
        vec![
            "Unknown element: <Page.Resources>",
            "Unknown attribute x:Key in element <SolidColorBrush>",
            "Namespace prefix 'xmlns' not defined for attribute xmlns:x in element <Page>",
            "Namespace prefix 'xmlns' not defined for attribute xmlns:controls in element <Page>",
            "Namespace prefix 'x' not defined for attribute x:Key in element <SolidColorBrush>",
            "Unknown control: <Page.Resources>",
        ]
    );
}

#[test]
fn test_page_clean_with_config() {
    let config = Config {
        known_elements: vec!["Page.Resources".to_string()],
        known_controls: vec!["Page.Resources".to_string()],
        known_attributes: [("SolidColorBrush".to_string(), vec!["x:Key".to_string()])].into(),
        root_namespace_declarations: true,
        ..Default::default()
    };
    let output = XamlFormatter::with_config(&config).format_and_validate(PAGE);
    assert!(output.is_clean(), "unexpected: {:?}", output.messages());
}

#[test]
fn test_idempotent() {
    let once = format_and_validate(PAGE).formatted;
    let twice = format_and_validate(&once).formatted;
    assert_eq!(once, twice);
}

#[test]
fn test_whitespace_invariance() {
    let compact =
        r#"<Grid><StackPanel><TextBlock Text="a"/><TextBlock Text="b"/></StackPanel></Grid>"#;
    let loose = "<Grid>\n\t<StackPanel>\n\n<TextBlock Text=\"a\"/>   \
                 <TextBlock Text=\"b\"/>\n</StackPanel>  </Grid>";
    assert_eq!(
        format_and_validate(compact).formatted,
        format_and_validate(loose).formatted
    );
}

#[test]
fn test_attribute_order_preserved() {
    let output =
        format_and_validate(r#"<Button Width="80" Content="Go" Margin="4" Click="OnGo" />"#);
    assert_eq!(
        output.formatted,
        "<Button Width=\"80\" Content=\"Go\" Margin=\"4\" Click=\"OnGo\" />\n"
    );
}

#[test]
fn test_unknown_attribute_example() {
    let output = format_and_validate(r#"<Grid><TextBlock Text="Hi" Foo="x"/></Grid>"#);
    assert_eq!(output.formatted, "<Grid>\n  <TextBlock Text=\"Hi\" Foo=\"x\" />\n</Grid>\n");
    assert_eq!(output.messages(), vec!["Unknown attribute Foo in element <TextBlock>"]);
}

#[test]
fn test_syntax_error_example() {
    let output = format_and_validate("<Grid><Grid>");
    assert_eq!(output.formatted, "<Grid><Grid>");
    assert_eq!(output.findings.len(), 1);
    assert!(output.messages()[0].starts_with("Syntax error: "));
}

#[test]
fn test_syntax_errors() {
    for source in [
        "",
        "<Grid></Border>",
        "<Grid /><Grid />",
        "<Grid A=\"1\" A=\"2\" />",
        "text <Grid />",
    ] {
        let output = format_and_validate(source);
        assert_eq!(output.formatted, source);
        assert_eq!(output.findings.len(), 1, "{:?}", source);
        assert!(output.findings[0].is_syntax_error());
    }
}

#[test]
fn test_missing_content_presence() {
    let output = format_and_validate("<Grid><StackPanel></StackPanel></Grid>");
    let expected =
        "Element <StackPanel> is empty and might be missing child elements or attributes.";
    assert!(output.messages().iter().any(|m| m == expected));
}

#[test]
fn test_missing_content_absence() {
    let output =
        format_and_validate(r#"<Grid><StackPanel><TextBlock Text="x" /></StackPanel></Grid>"#);
    assert!(!output.messages().iter().any(|m| m.contains("is empty")));
}

#[test]
fn test_forward_resource_reference() {
    let source = r#"<Grid>
        <TextBlock Foreground="{StaticResource Brand}" Text="x" />
        <ResourceDictionary><SolidColorBrush x:Key="Brand" Color="Red" /></ResourceDictionary>
    </Grid>"#;
    let output = format_and_validate(source);
    assert!(!output.messages().iter().any(|m| m.starts_with("Resource ")));
}

#[test]
fn test_style_conflict_same_and_different() {
    let same = r#"<ResourceDictionary>
        <Style TargetType="Button" />
        <Style TargetType="Button" />
    </ResourceDictionary>"#;
    let conflicts = format_and_validate(same)
        .messages()
        .into_iter()
        .filter(|m| m.starts_with("Conflicting styles"))
        .count();
    assert_eq!(conflicts, 2);

    let different = r#"<ResourceDictionary>
        <Style TargetType="Button" />
        <Style TargetType="TextBlock" />
    </ResourceDictionary>"#;
    assert!(!format_and_validate(different)
        .messages()
        .iter()
        .any(|m| m.starts_with("Conflicting styles")));
}

#[test]
fn test_registry_from_config() {
    let config = Config {
        converters: vec!["BoolToVisibilityConverter".to_string()],
        disabled_rules: vec!["unknown-element".to_string(), "unknown-control".to_string()],
        ..Default::default()
    };
    let source = r#"<ListView ItemConverter="{CountConverter}" Tag="x" />"#;
    let output = XamlFormatter::with_config(&config).format_and_validate(source);
    assert_eq!(
        output.messages(),
        vec!["Converter 'CountConverter' not found in element <ListView>"]
    );

    let default = format_and_validate(source);
    assert!(!default.messages().iter().any(|m| m.starts_with("Converter")));
}

#[test]
fn test_custom_engine() {
    let engine = RuleEngine::new();
    let output = XamlFormatter::with_engine(engine).format_and_validate("<Unknown />");
    assert!(output.is_clean());
    assert_eq!(output.formatted, "<Unknown />\n");
}

#[test]
fn test_normalize_matches_pipeline() {
    let doc = parse(PAGE).unwrap();
    assert_eq!(normalize(&doc), format_and_validate(PAGE).formatted);
}

#[test]
fn test_locate_against_output() {
    let output = format_and_validate("<Grid><Foo /></Grid>");
    let mut findings = output.findings.clone();
    findings.push(Finding::new("custom", "<Foo />"));
    let highlights = locate(&output.formatted, &findings);
    assert_eq!(highlights.len(), findings.len());
    let last = highlights.last().unwrap().as_ref().unwrap();
    assert_eq!(last.span.start_position(&output.formatted), (2, 3));
}

#[test]
fn test_registry_default_is_empty() {
    assert_eq!(Config::default().registry(), ExtensionRegistry::default());
}

#[test]
fn test_declaration_with_spaced_equals() {
    let source = r#"<?xml version = "1.0" encoding = "utf-8"?><Grid Background="Red" />"#;
    let output = format_and_validate(source);
    assert_eq!(
        output.formatted,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Grid Background=\"Red\" />\n"
    );
    assert!(output.is_clean());
}

#[test]
fn test_misplaced_declaration_is_syntax_error() {
    let source = r#"<Grid Background="Red" /><?xml version="1.0"?>"#;
    let output = format_and_validate(source);
    assert_eq!(output.formatted, source);
    assert_eq!(output.findings.len(), 1);
    assert!(output.findings[0].is_syntax_error());
}

#[test]
fn test_prefix_declared_only_by_xmlns_is_reported() {
    let output = format_and_validate(r#"<Page xmlns:x="urn:x"><Grid x:Name="a" /></Page>"#);
    let expected = "Namespace prefix 'x' not defined for attribute x:Name in element <Grid>";
    assert!(output.messages().iter().any(|m| m == expected));
}
