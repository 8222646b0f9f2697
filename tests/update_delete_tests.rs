/// UPDATE and DELETE command tests
///
/// Run with: cargo test --test update_delete_tests

use dmlforge::{
    ColumnMetadata, ColumnMetadataCollection, CommandBuilder, DataRequest, ProviderMetadata,
    ProviderType, SourceVersion,
};

fn orders() -> DataRequest {
    DataRequest::new(
        ProviderMetadata::new("Orders"),
        ColumnMetadataCollection::new(vec![
            ColumnMetadata::new("OrderID", ProviderType::Integer)
                .primary_key()
                .auto_increment(),
            ColumnMetadata::new("CustomerID", ProviderType::Integer),
            ColumnMetadata::new("RowVersion", ProviderType::TimeStamp).concurrency(),
            ColumnMetadata::new("Total", ProviderType::Money),
        ]),
    )
}

fn order_lines() -> DataRequest {
    DataRequest::new(
        ProviderMetadata::new("OrderLines").schema("sales"),
        ColumnMetadataCollection::new(vec![
            ColumnMetadata::new("OrderID", ProviderType::Integer).primary_key(),
            ColumnMetadata::new("LineNo", ProviderType::SmallInt).primary_key(),
            ColumnMetadata::new("Sku", ProviderType::VarChar).max_length(20),
            ColumnMetadata::new("Qty", ProviderType::Integer),
            ColumnMetadata::new("Version", ProviderType::Integer).entity_spaces_concurrency(),
        ]),
    )
}

fn where_terms(text: &str) -> usize {
    let clause = text.split(" WHERE ").nth(1).unwrap_or_default();
    clause.split(" AND ").count()
}

#[test]
fn test_orders_update_example() {
    let builder = CommandBuilder::default();
    let mut request = orders();

    let cmd = builder.build_update(&mut request, &["Total"]).unwrap();

    assert_eq!(
        cmd.text,
        "UPDATE [Orders] SET [Total] = @Total WHERE [OrderID] = @OrderID AND [RowVersion] = @RowVersion;"
    );
    assert_eq!(cmd.parameter("@Total").unwrap().source_version, SourceVersion::Current);
    assert_eq!(cmd.parameter("@OrderID").unwrap().source_version, SourceVersion::Original);
    assert_eq!(cmd.parameter("@RowVersion").unwrap().source_version, SourceVersion::Original);
}

#[test]
fn test_predicate_count_matches_keys_and_tokens() {
    let builder = CommandBuilder::default();

    let mut request = orders();
    let update = builder.build_update(&mut request, &["CustomerID"]).unwrap();
    // one key + one timestamp
    assert_eq!(where_terms(&update.text), 2);

    let mut request = order_lines();
    let update = builder.build_update(&mut request, &["Qty"]).unwrap();
    // two keys + one application token
    assert_eq!(where_terms(&update.text), 3);

    let mut request = order_lines();
    let delete = builder.build_delete(&mut request).unwrap();
    assert_eq!(where_terms(&delete.text), 3);

    let mut request = orders();
    let delete = builder.build_delete(&mut request).unwrap();
    assert_eq!(where_terms(&delete.text), 1);
}

#[test]
fn test_update_ends_with_semicolon_delete_does_not() {
    let builder = CommandBuilder::default();

    let mut request = order_lines();
    let update = builder.build_update(&mut request, &["Sku"]).unwrap();
    assert!(update.text.ends_with(';'));

    let mut request = order_lines();
    let delete = builder.build_delete(&mut request).unwrap();
    assert!(!delete.text.ends_with(';'));
}

#[test]
fn test_where_parameters_follow_set_parameters() {
    let builder = CommandBuilder::default();
    let mut request = order_lines();

    let cmd = builder.build_update(&mut request, &["Qty", "Sku"]).unwrap();

    assert_eq!(
        cmd.text,
        "UPDATE [sales].[OrderLines] SET [Sku] = @Sku, [Qty] = @Qty, [Version] = [Version] + 1 \
         WHERE [OrderID] = @OrderID AND [LineNo] = @LineNo AND [Version] = @Version;"
    );
    let names: Vec<_> = cmd.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["@Sku", "@Qty", "@OrderID", "@LineNo", "@Version"]);
}

#[test]
fn test_application_token_set_fragment_has_no_parameter() {
    let builder = CommandBuilder::default();
    let mut request = order_lines();

    let cmd = builder.build_update(&mut request, &["Qty"]).unwrap();

    let version_params: Vec<_> = cmd
        .parameters
        .iter()
        .filter(|p| p.name == "@Version")
        .collect();
    assert_eq!(version_params.len(), 1);
    assert_eq!(version_params[0].source_version, SourceVersion::Original);
    assert!(cmd.text.contains("[Version] = [Version] + 1"));
}

#[test]
fn test_delete_binds_current_values() {
    let builder = CommandBuilder::default();
    let mut request = order_lines();

    let cmd = builder.build_delete(&mut request).unwrap();

    assert_eq!(
        cmd.text,
        "DELETE FROM [sales].[OrderLines] WHERE [OrderID] = @OrderID AND [LineNo] = @LineNo AND [Version] = @Version"
    );
    assert!(cmd
        .parameters
        .iter()
        .all(|p| p.source_version == SourceVersion::Current));
    assert!(request.properties.is_empty());
}
