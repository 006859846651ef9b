use crate::document::ReceiptDocument;
use crate::variant::{
    LBL_DEPARTURE_DATE, LBL_DESTINATION, LBL_ORDER_DATE, LBL_ORDER_FOR, LBL_ORDER_NO,
    LBL_RETURN_DATE, LBL_SIGNATURE,
};
use maud::html;

pub fn render_page(doc: &ReceiptDocument) -> String {
    let profile = doc.profile();
    let labels = doc.labels();
    let receipt = doc.receipt();

    let mut page = INDEX_HTML
        .replace("{{TITLE}}", profile.title)
        .replace("{{VARIANT}}", profile.variant.as_str())
        .replace("{{DOCUMENT}}", &doc.id().to_string())
        .replace("{{HEADING}}", profile.heading)
        .replace("{{ITEM_LABEL}}", profile.item_label)
        .replace("{{NAME_INPUT_ID}}", profile.name_input_id)
        .replace("{{AMOUNT_INPUT_ID}}", profile.amount_input_id)
        .replace("{{ADD_BUTTON_ID}}", profile.add_button_id)
        .replace("{{LIST_ID}}", profile.list_container_id)
        .replace("{{RECEIPT_LIST_ID}}", profile.receipt_container_id)
        .replace("{{COUNT_ID}}", profile.item_count_id)
        .replace("{{TOTAL_ID}}", profile.total_id)
        .replace("{{COUNT}}", &receipt.item_count.to_string())
        .replace("{{TOTAL}}", &receipt.formatted_total());

    for id in [
        LBL_ORDER_FOR,
        LBL_ORDER_NO,
        LBL_ORDER_DATE,
        LBL_DESTINATION,
        LBL_DEPARTURE_DATE,
        LBL_RETURN_DATE,
        LBL_SIGNATURE,
    ] {
        page = page.replace(&format!("{{{{{id}}}}}"), &escape(labels.get(id)));
    }

    // Fragments go in last and label text has its braces escaped, so user
    // input never forms a placeholder.
    page.replace("{{LIST}}", &doc.list_html())
        .replace("{{RECEIPT}}", &receipt.html)
}

fn escape(text: &str) -> String {
    html! { (text) }.into_string().replace('{', "&#123;")
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #22211f;
      --muted: #7a746d;
      --primary: #3b5bdb;
      --primary-dark: #2f4ac0;
      --paper: #fffdf8;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      grid-template-columns: minmax(280px, 420px) minmax(300px, 380px);
      justify-content: center;
      gap: 32px;
      padding: 32px 18px;
    }

    .form {
      display: grid;
      gap: 12px;
      align-content: start;
    }

    .form label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
    }

    .form input {
      width: 100%;
      border: 1px solid #d6d0c7;
      border-radius: 6px;
      padding: 8px 12px;
      font: inherit;
    }

    .row,
    .list-row {
      display: flex;
      gap: 8px;
      align-items: center;
    }

    .list-row {
      margin-top: 8px;
    }

    .list-amount {
      max-width: 110px;
      text-align: center;
    }

    button {
      border: none;
      border-radius: 6px;
      padding: 8px 14px;
      background: var(--primary);
      color: white;
      font: inherit;
      cursor: pointer;
    }

    button:hover {
      background: var(--primary-dark);
    }

    .icon {
      width: 20px;
      height: 20px;
    }

    .receipt {
      background: var(--paper);
      padding: 28px 24px;
      font-family: "Courier New", monospace;
      box-shadow: 0 18px 40px rgba(0, 0, 0, 0.12);
      align-self: start;
    }

    .receipt h2 {
      text-align: center;
      margin: 0 0 4px;
      letter-spacing: 0.2em;
    }

    .receipt .meta,
    .receipt-line,
    .receipt .totals div {
      display: flex;
      justify-content: space-between;
      gap: 12px;
    }

    .receipt hr {
      border: none;
      border-top: 1px dashed var(--muted);
      margin: 14px 0;
    }

    .receipt .signature {
      margin-top: 24px;
      text-align: center;
    }

    @media (max-width: 760px) {
      body {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body data-variant="{{VARIANT}}" data-document="{{DOCUMENT}}">
  <section class="form">
    <h1>{{HEADING}}</h1>

    <label for="txtOrderFor">Name</label>
    <input id="txtOrderFor" type="text" placeholder="{{lblOrderFor}}" data-target="#lblOrderFor" data-target2="#lblSignature" />

    <label for="txtDestination">Destination</label>
    <input id="txtDestination" type="text" placeholder="{{lblDestination}}" data-target="#lblDestination" />

    <div class="row">
      <div>
        <label for="txtDepartureDate">Departure</label>
        <input id="txtDepartureDate" type="date" data-target="#lblDepartureDate" />
      </div>
      <div>
        <label for="txtReturnDate">Return</label>
        <input id="txtReturnDate" type="date" data-target="#lblReturnDate" />
      </div>
    </div>

    <label for="{{NAME_INPUT_ID}}">New {{ITEM_LABEL}}</label>
    <div class="row">
      <input id="{{NAME_INPUT_ID}}" type="text" placeholder="Name" />
      <input id="{{AMOUNT_INPUT_ID}}" class="list-amount" type="text" inputmode="decimal" placeholder="0.00" />
      <button id="{{ADD_BUTTON_ID}}" type="button">Add</button>
    </div>

    <div id="{{LIST_ID}}">{{LIST}}</div>

    <button id="btnDownloadReceipt" type="button">Download receipt</button>
  </section>

  <section class="receipt" id="receipt">
    <h2>RECEIPT</h2>
    <div class="meta"><span>ORDER</span><span id="lblOrderNo">{{lblOrderNo}}</span></div>
    <div class="meta"><span>DATE</span><span id="lblOrderDate">{{lblOrderDate}}</span></div>
    <div class="meta"><span>FOR</span><span id="lblOrderFor">{{lblOrderFor}}</span></div>
    <div class="meta"><span>TO</span><span id="lblDestination">{{lblDestination}}</span></div>
    <div class="meta"><span>DEPART</span><span id="lblDepartureDate">{{lblDepartureDate}}</span></div>
    <div class="meta"><span>RETURN</span><span id="lblReturnDate">{{lblReturnDate}}</span></div>
    <hr />
    <div id="{{RECEIPT_LIST_ID}}">{{RECEIPT}}</div>
    <hr />
    <div class="totals">
      <div><span>ITEM COUNT</span><span id="{{COUNT_ID}}">{{COUNT}}</span></div>
      <div><strong>TOTAL</strong><strong id="{{TOTAL_ID}}">{{TOTAL}}</strong></div>
    </div>
    <p class="signature">THANK YOU, <span id="lblSignature">{{lblSignature}}</span></p>
  </section>

  <script src="https://cdn.jsdelivr.net/npm/html-to-image@1.11.11/dist/html-to-image.js"></script>
  <script src="/js/receipt.js"></script>
</body>
</html>
"##;
